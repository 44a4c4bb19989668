//! KMS code decrypter
//!
//! The identity provider hands over the one-time code as a base64 AWS
//! Encryption SDK message whose data key is wrapped by the configured KMS
//! key. The message is opened with the Encryption SDK under a
//! forbid-encrypt/allow-decrypt commitment policy.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_esdk::client::Client as EsdkClient;
use aws_esdk::material_providers::client::Client as MplClient;
use aws_esdk::material_providers::types::keyring::KeyringRef;
use aws_esdk::material_providers::types::material_providers_config::MaterialProvidersConfig;
use aws_esdk::material_providers::types::EsdkCommitmentPolicy;
use aws_esdk::types::aws_encryption_sdk_config::AwsEncryptionSdkConfig;
use aws_sdk_kms::{primitives::Blob, Client as KmsClient};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::sync::OnceCell;

use cms_core::errors::AppResult;
use cms_core::services::CodeDecrypter;

use crate::InfrastructureError;

fn crypto_error(context: &str, err: impl std::fmt::Display) -> InfrastructureError {
    InfrastructureError::Crypto(format!("{}: {}", context, err))
}

/// Opens an Encryption SDK message
#[async_trait]
pub trait EnvelopeDecryptor: Send + Sync {
    async fn decrypt_message(&self, message: Vec<u8>) -> Result<Vec<u8>, InfrastructureError>;
}

/// Encryption SDK decryptor backed by a keyring
pub struct EsdkEnvelopeDecryptor {
    esdk: EsdkClient,
    mpl: MplClient,
    kms: Option<(KmsClient, String)>,
    keyring: OnceCell<KeyringRef>,
}

impl EsdkEnvelopeDecryptor {
    fn clients() -> Result<(EsdkClient, MplClient), InfrastructureError> {
        let esdk_config = AwsEncryptionSdkConfig::builder()
            .commitment_policy(EsdkCommitmentPolicy::ForbidEncryptAllowDecrypt)
            .build()
            .map_err(|e| crypto_error("invalid encryption sdk config", e))?;
        let esdk = EsdkClient::from_conf(esdk_config)
            .map_err(|e| crypto_error("failed to create encryption sdk client", e))?;

        let mpl_config = MaterialProvidersConfig::builder()
            .build()
            .map_err(|e| crypto_error("invalid material providers config", e))?;
        let mpl = MplClient::from_conf(mpl_config)
            .map_err(|e| crypto_error("failed to create material providers client", e))?;

        Ok((esdk, mpl))
    }

    /// Decrypt with a KMS keyring for `key_id`, created on first use
    pub fn with_kms_key(kms_client: KmsClient, key_id: impl Into<String>) -> Result<Self, InfrastructureError> {
        let (esdk, mpl) = Self::clients()?;
        Ok(Self {
            esdk,
            mpl,
            kms: Some((kms_client, key_id.into())),
            keyring: OnceCell::new(),
        })
    }

    /// Decrypt with an already built keyring
    pub fn with_keyring(keyring: KeyringRef) -> Result<Self, InfrastructureError> {
        let (esdk, mpl) = Self::clients()?;
        Ok(Self {
            esdk,
            mpl,
            kms: None,
            keyring: OnceCell::new_with(Some(keyring)),
        })
    }

    async fn keyring(&self) -> Result<&KeyringRef, InfrastructureError> {
        self.keyring
            .get_or_try_init(|| async {
                let (kms_client, key_id) = self
                    .kms
                    .as_ref()
                    .ok_or_else(|| InfrastructureError::Crypto("no keyring configured".to_string()))?;

                self.mpl
                    .create_aws_kms_keyring()
                    .kms_key_id(key_id.clone())
                    .kms_client(kms_client.clone())
                    .send()
                    .await
                    .map_err(|e| crypto_error("failed to create KMS keyring", e))
            })
            .await
    }
}

#[async_trait]
impl EnvelopeDecryptor for EsdkEnvelopeDecryptor {
    async fn decrypt_message(&self, message: Vec<u8>) -> Result<Vec<u8>, InfrastructureError> {
        let keyring = self.keyring().await?;

        let output = self
            .esdk
            .decrypt()
            .ciphertext(Blob::new(message))
            .keyring(keyring.clone())
            .send()
            .await
            .map_err(|e| crypto_error("encryption sdk decrypt failed", e))?;

        output
            .plaintext
            .map(Blob::into_inner)
            .ok_or_else(|| InfrastructureError::Crypto("encryption sdk returned no plaintext".to_string()))
    }
}

/// Decrypts provider-supplied codes wrapped by a KMS key
pub struct KmsCodeDecrypter<E: EnvelopeDecryptor = EsdkEnvelopeDecryptor> {
    envelope: E,
    key_id: String,
}

impl KmsCodeDecrypter {
    pub fn from_sdk_config(config: &SdkConfig, key_id: impl Into<String>) -> Result<Self, InfrastructureError> {
        let key_id = key_id.into();
        let envelope = EsdkEnvelopeDecryptor::with_kms_key(KmsClient::new(config), key_id.clone())?;
        Ok(Self::with_envelope(envelope, key_id))
    }
}

impl<E: EnvelopeDecryptor> KmsCodeDecrypter<E> {
    pub fn with_envelope(envelope: E, key_id: impl Into<String>) -> Self {
        Self {
            envelope,
            key_id: key_id.into(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Decode the base64 transport encoding of a ciphertext
pub fn decode_ciphertext(ciphertext: &str) -> Result<Vec<u8>, InfrastructureError> {
    STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| InfrastructureError::Crypto(format!("ciphertext is not valid base64: {}", e)))
}

/// Interpret decrypted bytes as the plaintext code
pub fn plaintext_to_string(plaintext: &[u8]) -> Result<String, InfrastructureError> {
    String::from_utf8(plaintext.to_vec())
        .map_err(|_| InfrastructureError::Crypto("plaintext is not valid UTF-8".to_string()))
}

#[async_trait]
impl<E: EnvelopeDecryptor> CodeDecrypter for KmsCodeDecrypter<E> {
    async fn decrypt(&self, ciphertext: &str) -> AppResult<String> {
        let message = decode_ciphertext(ciphertext)?;

        let plaintext = self.envelope.decrypt_message(message).await.map_err(|e| {
            tracing::error!(
                error = %e,
                key_id = %self.key_id,
                event = "decrypt_failed",
                "Code decryption failed"
            );
            e
        })?;

        Ok(plaintext_to_string(&plaintext)?)
    }
}
