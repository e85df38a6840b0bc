//! CLI tool for deploying and operating the synthetic dollar engine.

use odra::casper_types::U256;
use odra::host::HostEnv;
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};
use synthusd_contracts::engine::price_feed::PriceFeed;
use synthusd_contracts::engine::synth_engine::SynthEngine;
use synthusd_contracts::token::SynthUsdToken;
use synthusd_contracts::tokens::CollateralToken;

/// Deploys the whole system: synthetic token, a WCSPR collateral token with
/// its price feed, and the engine, then hands token ownership to the engine.
pub struct EngineDeployScript;

impl DeployScript for EngineDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use synthusd_contracts::engine::price_feed::PriceFeedInitArgs;
        use synthusd_contracts::engine::synth_engine::SynthEngineInitArgs;
        use synthusd_contracts::tokens::CollateralTokenInitArgs;
        use odra::host::NoArgs;

        let mut synth = SynthUsdToken::load_or_deploy(
            &env,
            NoArgs,
            container,
            300_000_000_000 // Gas limit for token deployment
        )?;

        let wcspr = CollateralToken::load_or_deploy(
            &env,
            CollateralTokenInitArgs {
                name: String::from("Wrapped CSPR"),
                symbol: String::from("WCSPR"),
                decimals: 18,
            },
            container,
            300_000_000_000
        )?;

        // $0.05 at 8 feed decimals
        let wcspr_feed = PriceFeed::load_or_deploy(
            &env,
            PriceFeedInitArgs {
                description: String::from("WCSPR / USD"),
                initial_answer: U256::from(5_000_000u64),
            },
            container,
            300_000_000_000
        )?;

        let engine = SynthEngine::load_or_deploy(
            &env,
            SynthEngineInitArgs {
                collateral_tokens: vec![wcspr.address().clone()],
                price_feeds: vec![wcspr_feed.address().clone()],
                synth_token: synth.address().clone(),
            },
            container,
            500_000_000_000 // Gas limit for engine deployment
        )?;

        // Only the engine may mint and burn the synthetic dollar
        env.set_gas(100_000_000_000);
        synth.transfer_ownership(engine.address().clone());

        Ok(())
    }
}

/// Scenario to push a new answer to the price feed.
pub struct SetPriceScenario;

impl Scenario for SetPriceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "answer",
                "New price, scaled to 8 decimals",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut feed = container.contract_ref::<PriceFeed>(env)?;
        let answer = args.get_single::<U256>("answer")?;

        env.set_gas(100_000_000_000);
        feed.try_set_answer(answer)?;

        println!("Price feed updated!");
        Ok(())
    }
}

impl ScenarioMetadata for SetPriceScenario {
    const NAME: &'static str = "set-price";
    const DESCRIPTION: &'static str = "Pushes a new answer to the collateral price feed";
}

/// Scenario to inspect an account's position.
pub struct AccountInfoScenario;

impl Scenario for AccountInfoScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "account",
                "Account to inspect",
                NamedCLType::Key,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let engine = container.contract_ref::<SynthEngine>(env)?;
        let account = args.get_single::<Address>("account")?;

        let (debt, collateral_value) = engine.get_account_information(account);
        let health = engine.health_factor(account);
        println!("debt: {debt}, collateral value: {collateral_value}, health factor: {health}");
        Ok(())
    }
}

impl ScenarioMetadata for AccountInfoScenario {
    const NAME: &'static str = "account-info";
    const DESCRIPTION: &'static str = "Prints an account's debt, collateral value and health factor";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the synthetic dollar engine contracts")
        // Deploy scripts
        .deploy(EngineDeployScript)
        // Contract references
        .contract::<SynthEngine>()
        .contract::<SynthUsdToken>()
        .contract::<CollateralToken>()
        .contract::<PriceFeed>()
        // Scenarios
        .scenario(SetPriceScenario)
        .scenario(AccountInfoScenario)
        .build()
        .run();
}
