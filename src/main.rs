use bfx_wallet::BfxError;
use bfx_wallet::config::fetch_config;
use bfx_wallet::credentials::populate_env_from_keychain;
use bfx_wallet::rest::Client;
use tracing::info;

fn main() -> Result<(), BfxError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    for key in populate_env_from_keychain() {
        info!(variable = key.env_var(), "using credential from keychain");
    }
    let app_config = fetch_config()?;
    let client = Client::from_config(&app_config)?;

    let snapshot = client.wallet().wallets()?;
    for wallet in &snapshot.wallets {
        info!(
            wallet_type = %wallet.wallet_type,
            currency = %wallet.currency,
            balance = %wallet.balance,
            available = %wallet.balance_available,
            "wallet"
        );
    }

    let movements = client.wallet().movements(None, None, Some(25))?;
    for movement in &movements {
        info!(
            id = movement.id,
            currency = %movement.currency,
            status = %movement.status,
            amount = %movement.amount,
            "movement"
        );
    }

    Ok(())
}
