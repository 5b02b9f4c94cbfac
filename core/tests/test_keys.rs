#[cfg(test)]
mod tests {
    use jab_core::config::KdfParams;
    use jab_core::crypto::{
        hash, AsymmetricCipher, AsymmetricSigner, Cipher, CipherSuite, CryptoError, MacSigner, SecretKey,
        Signer, SymmetricCipher,
    };
    use jab_core::types::JabError;

    fn quick_kdf() -> KdfParams {
        KdfParams { iterations: 1000 }
    }

    #[test]
    fn test_passphrase_key_matches_pbkdf2_vector() {
        let cipher = SymmetricCipher::from_passphrase(CipherSuite::Aes256Gcm, "SomeSuperSecretKey", Some("SomeSalt"))
            .unwrap();
        let expected: [u8; 32] = [
            0x05, 0x9d, 0xa2, 0x51, 0xf9, 0xeb, 0x65, 0x16, 0xd5, 0x5b, 0x0c, 0x03, 0x71, 0x90, 0x8f, 0x42,
            0x0a, 0xad, 0x80, 0x0f, 0x2f, 0x56, 0x9b, 0x90, 0x27, 0xfc, 0x17, 0x49, 0x1a, 0x28, 0x60, 0x75,
        ];
        assert_eq!(cipher.key_bytes().unwrap(), &expected);
        assert_eq!(cipher.key_id().unwrap(), 791_737_904_399_070);
    }

    #[test]
    fn test_missing_salt_falls_back_to_passphrase() {
        let params = quick_kdf();
        let a = SecretKey::from_passphrase("AES-256-GCM", 32, "pass", None, &params).unwrap();
        let b = SecretKey::from_passphrase("AES-256-GCM", 32, "pass", Some("pass"), &params).unwrap();
        assert_eq!(a.bytes(), b.bytes());
        assert_eq!(a.key_id().unwrap(), 2_796_213_775_566_383);
    }

    #[test]
    fn test_key_id_requires_key() {
        let key = SecretKey::new("AES-256-GCM", 32);
        assert!(matches!(key.key_id(), Err(JabError::State(_))));

        let cipher = SymmetricCipher::new(CipherSuite::Chacha20Poly1305);
        let err = cipher.encrypt(b"data").unwrap_err();
        assert!(matches!(err, CryptoError::MissingKey(_)));
    }

    #[test]
    fn test_wrong_length_bytes_rejected() {
        let err = SymmetricCipher::from_key_bytes(CipherSuite::Aes256Gcm, &[7u8; 16]).unwrap_err();
        assert!(matches!(err, JabError::Crypto(CryptoError::InvalidKeyLen { expected: 32, actual: 16 })));
    }

    #[test]
    fn test_symmetric_round_trip_from_exported_bytes() {
        for suite in [CipherSuite::Aes256Gcm, CipherSuite::Chacha20Poly1305] {
            let original = SymmetricCipher::random(suite).unwrap();
            let copy = SymmetricCipher::from_key_bytes(suite, original.key_bytes().unwrap()).unwrap();
            assert_eq!(original.key_id().unwrap(), copy.key_id().unwrap());

            let ct = original.encrypt(b"positional payload").unwrap();
            assert_eq!(copy.decrypt(&ct).unwrap(), b"positional payload");
        }
    }

    #[test]
    fn test_symmetric_ciphertext_is_deterministic_per_key() {
        let cipher = SymmetricCipher::from_passphrase_with(CipherSuite::Aes256Gcm, "k", None, &quick_kdf()).unwrap();
        assert_eq!(cipher.encrypt(b"same").unwrap(), cipher.encrypt(b"same").unwrap());
    }

    #[test]
    fn test_suites_have_distinct_key_ids() {
        let params = quick_kdf();
        let aes = SymmetricCipher::from_passphrase_with(CipherSuite::Aes256Gcm, "k", None, &params).unwrap();
        let cha = SymmetricCipher::from_passphrase_with(CipherSuite::Chacha20Poly1305, "k", None, &params).unwrap();
        assert_eq!(aes.key_bytes(), cha.key_bytes());
        assert_ne!(aes.key_id().unwrap(), cha.key_id().unwrap());
    }

    #[test]
    fn test_wrong_key_fails_closed() {
        let params = quick_kdf();
        let right = SymmetricCipher::from_passphrase_with(CipherSuite::Aes256Gcm, "right", None, &params).unwrap();
        let wrong = SymmetricCipher::from_passphrase_with(CipherSuite::Aes256Gcm, "wrong", None, &params).unwrap();
        let ct = right.encrypt(b"secret").unwrap();
        assert!(matches!(wrong.decrypt(&ct), Err(CryptoError::Decrypt { .. })));
    }

    #[test]
    fn test_key_id_is_algorithm_plus_key_hash() {
        let cipher = SymmetricCipher::random(CipherSuite::Chacha20Poly1305).unwrap();
        let bytes = cipher.key_bytes().unwrap();
        let expected = hash(&["ChaCha20-Poly1305".as_bytes(), bytes]).unwrap();
        assert_eq!(cipher.key_id().unwrap(), expected);
    }

    #[test]
    fn test_asymmetric_cipher_public_encrypts_private_decrypts() {
        let pair = AsymmetricCipher::random();
        let sender = AsymmetricCipher::from_public_key_bytes(&pair.public_key_bytes().unwrap()).unwrap();
        assert_eq!(sender.key_id().unwrap(), pair.key_id().unwrap());

        let ct1 = sender.encrypt(b"sealed").unwrap();
        let ct2 = sender.encrypt(b"sealed").unwrap();
        assert_ne!(ct1, ct2, "ephemeral keys make every box unique");
        assert_eq!(pair.decrypt(&ct1).unwrap(), b"sealed");
        assert_eq!(pair.decrypt(&ct2).unwrap(), b"sealed");

        assert!(matches!(sender.decrypt(&ct1), Err(CryptoError::MissingKey(_))));
    }

    #[test]
    fn test_asymmetric_cipher_restored_from_private_bytes() {
        let pair = AsymmetricCipher::random();
        let restored = AsymmetricCipher::from_private_key_bytes(&pair.private_key_bytes().unwrap()[..]).unwrap();
        assert_eq!(restored.key_id().unwrap(), pair.key_id().unwrap());
        let ct = pair.encrypt(b"x").unwrap();
        assert_eq!(restored.decrypt(&ct).unwrap(), b"x");
    }

    #[test]
    fn test_sealed_box_rejects_truncation() {
        let pair = AsymmetricCipher::random();
        let ct = pair.encrypt(b"payload").unwrap();
        assert!(pair.decrypt(&ct[..20]).is_err());
    }

    #[test]
    fn test_mac_signer_round_trip() {
        let signer = MacSigner::from_passphrase_with("mac key", Some("salt"), &quick_kdf()).unwrap();
        let verifier = MacSigner::from_key_bytes(signer.key_bytes().unwrap()).unwrap();
        assert_eq!(signer.key_id().unwrap(), verifier.key_id().unwrap());

        let sig = signer.sign(b"[1,2,3]").unwrap();
        assert!(verifier.verify(b"[1,2,3]", &sig).unwrap());
        assert!(!verifier.verify(b"[1,2,4]", &sig).unwrap());
    }

    #[test]
    fn test_ed25519_signer_round_trip() {
        let signer = AsymmetricSigner::random();
        let verifier = AsymmetricSigner::from_public_key_bytes(&signer.public_key_bytes().unwrap()).unwrap();
        assert_eq!(signer.key_id().unwrap(), verifier.key_id().unwrap());

        let sig = signer.sign(b"payload").unwrap();
        assert!(verifier.verify(b"payload", &sig).unwrap());
        assert!(!verifier.verify(b"payloaD", &sig).unwrap());
        assert!(matches!(verifier.sign(b"payload"), Err(CryptoError::MissingKey(_))));
        assert!(matches!(
            verifier.verify(b"payload", &sig[..10]),
            Err(CryptoError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn test_ed25519_restored_from_private_bytes() {
        let signer = AsymmetricSigner::random();
        let copy = AsymmetricSigner::from_private_key_bytes(&signer.private_key_bytes().unwrap()[..]).unwrap();
        assert_eq!(copy.key_id().unwrap(), signer.key_id().unwrap());
        let sig = copy.sign(b"m").unwrap();
        assert!(signer.verify(b"m", &sig).unwrap());
    }
}
