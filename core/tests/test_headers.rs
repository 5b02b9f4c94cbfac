mod common;

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use jab_core::codec::{values_json, Positional};
    use jab_core::config::TextEncoding;
    use jab_core::crypto::{
        AsymmetricCipher, AsymmetricSigner, Cipher, CipherSuite, Keyring, MacSigner, Signer, SymmetricCipher,
    };
    use jab_core::headers::{
        Bson, Cbor, Checksum, Compress, Crypto, HeaderChain, MessagePack, NullElision, Signature, Stage,
        StringSafe,
    };
    use jab_core::types::{JabError, Result};
    use jab_core::utils::{unwrap, wrap};
    use serde_json::{json, Value};

    use crate::common::{full_dummy, some_person, Person};

    fn person_positional() -> Positional {
        Positional::of(&some_person()).unwrap()
    }

    fn body_of(positional: &Positional) -> Vec<u8> {
        unwrap(positional.json()).as_bytes().to_vec()
    }

    /// Appends its marker going forward and insists on popping it going back.
    struct Marker(u8);

    impl Stage for Marker {
        fn type_name(&self) -> &str {
            "Marker"
        }

        fn obfuscate(&self, mut payload: Vec<u8>) -> Result<Vec<u8>> {
            payload.push(self.0);
            Ok(payload)
        }

        fn deobfuscate(&self, mut payload: Vec<u8>, _keyring: &Keyring) -> Result<Vec<u8>> {
            match payload.pop() {
                Some(m) if m == self.0 => Ok(payload),
                _ => Err(JabError::format("markers undone out of order")),
            }
        }
    }

    /// Records populate/validate calls.
    struct Probe {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Stage for Probe {
        fn type_name(&self) -> &str {
            "Probe"
        }

        fn populate(&mut self, _payload: &Positional) -> Result<()> {
            self.log.lock().unwrap().push(format!("populate:{}", self.name));
            Ok(())
        }

        fn validate(&self, _payload: &Positional, _keyring: &Keyring) -> Result<()> {
            self.log.lock().unwrap().push(format!("validate:{}", self.name));
            Ok(())
        }
    }

    #[test]
    fn test_chain_undoes_stages_in_reverse() {
        let chain = HeaderChain::new("Markers").with("a", Marker(b'a')).with("b", Marker(b'b')).with("c", Marker(b'c'));
        let out = chain.obfuscate(b"x".to_vec()).unwrap();
        assert_eq!(out, b"xabc".to_vec());
        assert_eq!(chain.deobfuscate(out, &Keyring::new()).unwrap(), b"x".to_vec());
    }

    #[test]
    fn test_chain_populates_forward_validates_backward() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = HeaderChain::new("Probes")
            .with("one", Probe { name: "one", log: log.clone() })
            .with("two", Probe { name: "two", log: log.clone() });
        let positional = person_positional();
        chain.populate(&positional).unwrap();
        chain.validate(&positional, &Keyring::new()).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["populate:one", "populate:two", "validate:two", "validate:one"]
        );
    }

    #[test]
    fn test_chain_header_slots_sorted_by_entry_name() {
        let cipher: Arc<dyn Cipher> = Arc::new(SymmetricCipher::random(CipherSuite::Aes256Gcm).unwrap());
        let key_id = cipher.key_id().unwrap();
        let mut chain = HeaderChain::new("Mixed")
            .with("zeta", Checksum::new())
            .with("mid", NullElision)
            .with("alpha", Crypto::with_cipher(cipher));
        assert!(chain.has_header());
        assert_eq!(chain.header_field_names(), vec!["alpha:[key_id]", "zeta:[checksum]"]);
        assert_eq!(chain.stage_names(), vec!["zeta", "mid", "alpha"]);

        let positional = person_positional();
        chain.populate(&positional).unwrap();
        let checksum = jab_core::crypto::hash_str(positional.json());
        assert_eq!(chain.header_values().unwrap(), vec![json!([key_id]), json!([checksum])]);
    }

    #[test]
    fn test_transform_only_chain_has_no_header_fields() {
        let chain = HeaderChain::new("Plain").with("nulls", NullElision).with("compress", Compress::default());
        assert!(!chain.has_header());
        assert!(chain.header_values().unwrap().is_empty());
    }

    #[test]
    fn test_nested_chain_header_round_trip() {
        let build = || {
            HeaderChain::new("Outer")
                .with("inner", HeaderChain::new("Inner").with("checksum", Checksum::new()))
                .with("sum", Checksum::new())
        };
        let positional = person_positional();
        let mut chain = build();
        chain.populate(&positional).unwrap();
        let values = chain.header_values().unwrap();
        let checksum = jab_core::crypto::hash_str(positional.json());
        assert_eq!(values, vec![json!([[checksum]]), json!([checksum])]);
        assert_eq!(chain.header_field_names(), vec!["inner:[checksum:[checksum]]", "sum:[checksum]"]);

        let mut restored = build();
        restored.load_header(values).unwrap();
        restored.validate(&positional, &Keyring::new()).unwrap();
    }

    #[test]
    fn test_chain_resets_slots_the_header_leaves_out() {
        let cipher: Arc<dyn Cipher> = Arc::new(SymmetricCipher::random(CipherSuite::Aes256Gcm).unwrap());
        let mut chain = HeaderChain::new("Mixed")
            .with("zeta", Checksum::new())
            .with("alpha", Crypto::with_cipher(cipher));
        let positional = person_positional();
        chain.populate(&positional).unwrap();

        // null for "alpha", nothing at all for "zeta"
        chain.load_header(vec![Value::Null]).unwrap();
        assert_eq!(chain.header_values().unwrap(), vec![json!([null]), json!([null])]);
        let err = chain.validate(&positional, &Keyring::new()).unwrap_err();
        assert!(matches!(err, JabError::Integrity(_)), "{err:?}");
    }

    #[test]
    fn test_chain_rejects_non_array_header_slot() {
        let mut chain = HeaderChain::new("One").with("checksum", Checksum::new());
        let err = chain.load_header(vec![json!(12)]).unwrap_err();
        assert!(matches!(err, JabError::Format { .. }));
    }

    #[test]
    fn test_checksum_detects_changed_payload() {
        let mut checksum = Checksum::new();
        checksum.populate(&person_positional()).unwrap();
        assert!(checksum.checksum().is_some());
        checksum.validate(&person_positional(), &Keyring::new()).unwrap();

        let other = Positional::of(&Person { name: "Other".into(), age: 1 }).unwrap();
        let err = checksum.validate(&other, &Keyring::new()).unwrap_err();
        assert!(matches!(err, JabError::Integrity(_)));

        let empty = Checksum::new();
        assert!(matches!(empty.validate(&other, &Keyring::new()), Err(JabError::Integrity(_))));
    }

    #[test]
    fn test_compress_round_trip() {
        let stage = Compress::new(9);
        let body = b"null,null,null,null,null,null,null,null,null,null,null,null".to_vec();
        let packed = stage.obfuscate(body.clone()).unwrap();
        assert!(packed.len() < body.len());
        assert_eq!(stage.deobfuscate(packed, &Keyring::new()).unwrap(), body);

        let err = stage.deobfuscate(b"not zlib".to_vec(), &Keyring::new()).unwrap_err();
        assert!(matches!(err, JabError::Format { .. }));
        assert_eq!(Compress::new(42).level(), Compress::default().level());
    }

    #[test]
    fn test_string_safe_encodings() {
        let bytes = vec![0xfb, 0xff, 0x00, 0x10];
        let standard = StringSafe::new(TextEncoding::Standard).obfuscate(bytes.clone()).unwrap();
        assert_eq!(standard, b"+/8AEA==".to_vec());

        let url = StringSafe::new(TextEncoding::UrlSafe);
        let text = url.obfuscate(bytes.clone()).unwrap();
        assert_eq!(text, b"-_8AEA".to_vec());
        assert_eq!(url.deobfuscate(text, &Keyring::new()).unwrap(), bytes);

        let err = url.deobfuscate(b"***".to_vec(), &Keyring::new()).unwrap_err();
        assert!(matches!(err, JabError::Format { .. }));
    }

    #[test]
    fn test_crypto_requires_cipher_to_populate() {
        let mut stage = Crypto::new();
        let err = stage.populate(&person_positional()).unwrap_err();
        assert!(matches!(err, JabError::State(_)));
        assert!(matches!(stage.obfuscate(b"x".to_vec()), Err(JabError::State(_))));
    }

    #[test]
    fn test_crypto_decrypts_with_registered_key_only() {
        let cipher: Arc<dyn Cipher> = Arc::new(SymmetricCipher::random(CipherSuite::Chacha20Poly1305).unwrap());
        let mut stage = Crypto::with_cipher(cipher.clone());
        let positional = person_positional();
        stage.populate(&positional).unwrap();
        let sealed = stage.obfuscate(body_of(&positional)).unwrap();

        let mut reader = Crypto::new();
        reader.load_header(stage.header_values().unwrap()).unwrap();
        assert_eq!(reader.key_id(), stage.key_id());

        let keyring = Keyring::new();
        let err = reader.deobfuscate(sealed.clone(), &keyring).unwrap_err();
        assert!(matches!(err, JabError::UnknownKey(id) if Some(id) == stage.key_id()));

        keyring.keys().register(cipher).unwrap();
        assert_eq!(reader.deobfuscate(sealed, &keyring).unwrap(), body_of(&positional));
    }

    #[test]
    fn test_crypto_with_public_key_sender() {
        let pair = AsymmetricCipher::random();
        let sender: Arc<dyn Cipher> =
            Arc::new(AsymmetricCipher::from_public_key_bytes(&pair.public_key_bytes().unwrap()).unwrap());
        let keyring = Keyring::new();
        keyring.keys().register(Arc::new(pair)).unwrap();

        let mut stage = Crypto::with_cipher(sender);
        let positional = person_positional();
        stage.populate(&positional).unwrap();
        let sealed = stage.obfuscate(body_of(&positional)).unwrap();
        assert_eq!(stage.deobfuscate(sealed, &keyring).unwrap(), body_of(&positional));
    }

    #[test]
    fn test_signature_round_trip_and_failures() {
        let signer = Arc::new(MacSigner::random().unwrap());
        let mut stage = Signature::with_signer(signer.clone(), TextEncoding::Standard);
        let positional = person_positional();
        stage.populate(&positional).unwrap();
        assert_eq!(stage.key_id(), Some(signer.key_id().unwrap()));
        assert!(stage.signature().is_some());

        let mut reader = Signature::new(TextEncoding::Standard);
        reader.load_header(stage.header_values().unwrap()).unwrap();

        let keyring = Keyring::new();
        assert!(matches!(reader.validate(&positional, &keyring), Err(JabError::UnknownKey(_))));

        keyring.verifiers().register(signer).unwrap();
        reader.validate(&positional, &keyring).unwrap();

        let other = Positional::of(&Person { name: "Some Name".into(), age: 123457 }).unwrap();
        assert!(matches!(reader.validate(&other, &keyring), Err(JabError::Integrity(_))));
    }

    #[test]
    fn test_signature_requires_signer() {
        let mut stage = Signature::new(TextEncoding::UrlSafe);
        assert!(matches!(stage.populate(&person_positional()), Err(JabError::State(_))));
    }

    #[test]
    fn test_ed25519_signature_stage() {
        let signer = AsymmetricSigner::random();
        let verifier = AsymmetricSigner::from_public_key_bytes(&signer.public_key_bytes().unwrap()).unwrap();
        let keyring = Keyring::new();
        keyring.verifiers().register(Arc::new(verifier)).unwrap();

        let mut stage = Signature::with_signer(Arc::new(signer), TextEncoding::UrlSafe);
        let positional = Positional::of(&full_dummy()).unwrap();
        stage.populate(&positional).unwrap();
        stage.validate(&positional, &keyring).unwrap();
    }

    fn binary_round_trip(stage: &dyn Stage) {
        let positional = Positional::of(&full_dummy()).unwrap();
        let encoded = stage.obfuscate(body_of(&positional)).unwrap();
        assert_ne!(encoded, body_of(&positional));
        let decoded = stage.deobfuscate(encoded, &Keyring::new()).unwrap();
        let decoded: Vec<Value> = serde_json::from_str(&wrap(std::str::from_utf8(&decoded).unwrap())).unwrap();
        assert_eq!(decoded, positional.values(), "{}", stage.type_name());
    }

    #[test]
    fn test_binary_codecs_round_trip_values() {
        binary_round_trip(&Cbor::new());
        binary_round_trip(&MessagePack::new());
        binary_round_trip(&Bson::new());
    }

    #[test]
    fn test_binary_codec_rejects_garbage() {
        let err = Cbor::new().deobfuscate(vec![0xff, 0x00, 0x13], &Keyring::new()).unwrap_err();
        assert!(matches!(err, JabError::Format { .. }));
        let err = Bson::new().obfuscate(b"not json".to_vec()).unwrap_err();
        assert!(matches!(err, JabError::Format { .. }));
    }

    #[test]
    fn test_checksum_header_is_a_record() {
        let mut checksum = Checksum::new();
        checksum.populate(&person_positional()).unwrap();
        let values = checksum.header_values().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], json!(jab_core::crypto::hash_str(&values_json(&some_person()).unwrap())));
        assert_eq!(checksum.header_field_names(), vec!["checksum"]);
    }
}
