//! Infrastructure service container

use std::sync::Arc;

use cms_shared::config::SenderConfig;

use crate::crypto::KmsCodeDecrypter;
use crate::database::DynamoDbHistoryStore;
use crate::policy::OpaWasmLoader;
use crate::sms::AwsSnsSmsTransport;
use crate::InfrastructureError;

/// Managed-service adapters built once per process
#[derive(Clone)]
pub struct InfrastructureServices {
    pub decrypter: Arc<KmsCodeDecrypter>,
    pub transport: Arc<AwsSnsSmsTransport>,
    pub history_store: Arc<DynamoDbHistoryStore>,
    pub policy_loader: Arc<OpaWasmLoader>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The shared AWS SDK configuration (region and credentials from the environment)
/// - SNS and DynamoDB clients
/// - The Encryption SDK decrypter with a KMS keyring for the configured key
/// - The OPA WebAssembly engine
pub async fn initialize(config: &SenderConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(event = "infrastructure_init", "Initializing infrastructure services...");

    let sdk_config = crate::load_aws_config().await;

    let services = InfrastructureServices {
        decrypter: Arc::new(KmsCodeDecrypter::from_sdk_config(&sdk_config, &config.key_id)?),
        transport: Arc::new(AwsSnsSmsTransport::from_sdk_config(&sdk_config)),
        history_store: Arc::new(DynamoDbHistoryStore::from_sdk_config(&sdk_config)),
        policy_loader: Arc::new(policy_loader(config)?),
    };

    tracing::info!(
        region = ?sdk_config.region().map(|region| region.as_ref().to_string()),
        event = "infrastructure_ready",
        "Infrastructure services initialized successfully"
    );
    Ok(services)
}

fn policy_loader(config: &SenderConfig) -> Result<OpaWasmLoader, InfrastructureError> {
    let loader = OpaWasmLoader::new()?;
    Ok(match &config.sms_sender_policy_entrypoint {
        Some(entrypoint) => loader.with_entrypoint(entrypoint.as_str()),
        None => loader,
    })
}
