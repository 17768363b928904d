mod eth_adapter;

use std::{env, error::Error};

use eth_adapter::{
    adapter::{abi_types, start_eth_adapter},
    contract_names::ContractName,
};
use ethadapter::{runtime::MethodTable, setup_info_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_info_logger();

    let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".to_string());
    let adapter = start_eth_adapter(&rpc_url)?;

    for name in ContractName::ALL {
        let methods = adapter.methods().contract_methods(name.as_str()).unwrap_or_default();
        info!("{} exposes {} functions", name, methods.len());
    }

    let methods = adapter.methods();
    let stored = methods.STORAGE.get(&adapter).await?;
    info!("STORAGE.get() = {}", stored.to_json());

    let owner: abi_types::address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse()?;
    let balance = methods.TOKEN.balanceOf(&adapter, owner).await?;
    info!("TOKEN.balanceOf({}) = {}", owner, balance.to_json());

    if adapter.has_signer() {
        let sent = methods.TOKEN.deposit(&adapter, abi_types::uint256::from(1_000u64)).await?;
        info!("TOKEN.deposit sent in {}", sent.transaction_hash);
    }

    Ok(())
}
