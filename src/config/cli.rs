use crate::domain::model::{Credentials, ReservationQuery, ScrapeInput};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "salon-scrape")]
#[command(about = "Extracts a SALON BOARD reservation record via a headless browser")]
pub struct CliConfig {
    /// Portal login id
    #[arg(long)]
    pub user_id: Option<String>,

    /// Portal login password
    #[arg(long)]
    pub password: Option<String>,

    /// Reservation to extract
    #[arg(long)]
    pub reserve_id: Option<String>,

    /// Optional upstream proxy, forwarded to the browser launch
    #[arg(long)]
    pub proxy_url: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Extra tracking/ads domains to block, on top of the built-in list
    #[arg(long, value_delimiter = ',')]
    pub block_domains: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Assemble the validated run input. Must be called after
    /// `validate()`; a missing field still surfaces as a config error
    /// rather than a panic.
    pub fn scrape_input(&self) -> Result<ScrapeInput> {
        let user_id = validate_required_field("user_id", &self.user_id)?;
        let password = validate_required_field("password", &self.password)?;
        let reserve_id = validate_required_field("reserve_id", &self.reserve_id)?;

        Ok(ScrapeInput {
            credentials: Credentials {
                user_id: user_id.clone(),
                password: password.clone(),
            },
            query: ReservationQuery {
                reserve_id: reserve_id.clone(),
            },
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let user_id = validate_required_field("user_id", &self.user_id)?;
        validate_non_empty_string("user_id", user_id)?;

        let password = validate_required_field("password", &self.password)?;
        validate_non_empty_string("password", password)?;

        let reserve_id = validate_required_field("reserve_id", &self.reserve_id)?;
        validate_non_empty_string("reserve_id", reserve_id)?;

        if let Some(proxy_url) = &self.proxy_url {
            validate_url("proxy_url", proxy_url)?;
        }

        validate_path("output_path", &self.output_path)?;

        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn extra_block_domains(&self) -> &[String] {
        &self.block_domains
    }
}
