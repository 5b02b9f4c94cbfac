//! headers/groups.rs
//! Ready-made chains for the common recipes.
//!
//! | group             | pipeline                                        |
//! |-------------------|-------------------------------------------------|
//! | Compress          | checksum, nulls, compress, text                 |
//! | Crypto            | checksum, nulls, crypto, text                   |
//! | CompressCrypto    | checksum, nulls, compress, crypto, text         |
//! | Signed            | signature, nulls, compress, text                |
//! | Cbor/Bson/MsgPack | checksum, codec, text                           |
//!
//! A chain built without a cipher or signer can still decode; keys are then
//! looked up in the keyring.

use std::sync::Arc;

use crate::config::JabConfig;
use crate::crypto::{Cipher, Signer};
use crate::headers::binary::{Bson, Cbor, MessagePack};
use crate::headers::chain::HeaderChain;
use crate::headers::checksum::Checksum;
use crate::headers::compress::Compress;
use crate::headers::encrypt::Crypto;
use crate::headers::nulls::NullElision;
use crate::headers::signature::Signature;
use crate::headers::to_string::StringSafe;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HeaderGroup {
    Compress,
    Crypto,
    CompressCrypto,
    Signed,
    Cbor,
    Bson,
    MessagePack,
}

impl HeaderGroup {
    pub const ALL: [HeaderGroup; 7] = [
        HeaderGroup::Compress,
        HeaderGroup::Crypto,
        HeaderGroup::CompressCrypto,
        HeaderGroup::Signed,
        HeaderGroup::Cbor,
        HeaderGroup::Bson,
        HeaderGroup::MessagePack,
    ];

    /// Header type name of the chain.
    pub fn name(self) -> &'static str {
        match self {
            HeaderGroup::Compress => "CompressGroup",
            HeaderGroup::Crypto => "CryptoGroup",
            HeaderGroup::CompressCrypto => "CompressCryptoGroup",
            HeaderGroup::Signed => "SignedGroup",
            HeaderGroup::Cbor => "CborGroup",
            HeaderGroup::Bson => "BsonGroup",
            HeaderGroup::MessagePack => "MessagePackGroup",
        }
    }

    pub fn needs_cipher(self) -> bool {
        matches!(self, HeaderGroup::Crypto | HeaderGroup::CompressCrypto)
    }

    pub fn needs_signer(self) -> bool {
        matches!(self, HeaderGroup::Signed)
    }

    /// Chain without keys: enough to decode, or to encode keyless groups.
    pub fn chain(self, config: &JabConfig) -> HeaderChain {
        self.build(None, None, config)
    }

    /// Chain that encrypts under `cipher` (ignored by groups without a crypto stage).
    pub fn encrypted(self, cipher: Arc<dyn Cipher>, config: &JabConfig) -> HeaderChain {
        self.build(Some(cipher), None, config)
    }

    /// Chain that signs with `signer` (ignored by groups without a signature stage).
    pub fn signed(self, signer: Arc<dyn Signer>, config: &JabConfig) -> HeaderChain {
        self.build(None, Some(signer), config)
    }

    fn build(self, cipher: Option<Arc<dyn Cipher>>, signer: Option<Arc<dyn Signer>>, config: &JabConfig) -> HeaderChain {
        let text = StringSafe::new(config.text_encoding);
        let compress = Compress::new(config.compression_level);
        let crypto = || match cipher.clone() {
            Some(cipher) => Crypto::with_cipher(cipher),
            None => Crypto::new(),
        };

        let chain = HeaderChain::new(self.name());
        match self {
            HeaderGroup::Compress => chain
                .with("checksum", Checksum::new())
                .with("nulls", NullElision)
                .with("compress", compress)
                .with("text", text),
            HeaderGroup::Crypto => chain
                .with("checksum", Checksum::new())
                .with("nulls", NullElision)
                .with("crypto", crypto())
                .with("text", text),
            HeaderGroup::CompressCrypto => chain
                .with("checksum", Checksum::new())
                .with("nulls", NullElision)
                .with("compress", compress)
                .with("crypto", crypto())
                .with("text", text),
            HeaderGroup::Signed => {
                let signature = match signer {
                    Some(signer) => Signature::with_signer(signer, config.text_encoding),
                    None => Signature::new(config.text_encoding),
                };
                chain
                    .with("signature", signature)
                    .with("nulls", NullElision)
                    .with("compress", compress)
                    .with("text", text)
            }
            HeaderGroup::Cbor => chain
                .with("checksum", Checksum::new())
                .with("codec", Cbor::new())
                .with("text", text),
            HeaderGroup::Bson => chain
                .with("checksum", Checksum::new())
                .with("codec", Bson::new())
                .with("text", text),
            HeaderGroup::MessagePack => chain
                .with("checksum", Checksum::new())
                .with("codec", MessagePack::new())
                .with("text", text),
        }
    }
}
