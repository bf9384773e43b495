//! List the domains of an account, with their renewal dates and tags.
//!
//! Reads credentials from the environment:
//!
//! ```sh
//! export TRANSIP_LOGIN=demo-user
//! export TRANSIP_PRIVATE_KEY_FILE=/path/to/transip.key
//! cargo run --example list_domains
//! ```

use transip_sdk::{SdkError, Transip, TransipConfig};

fn main() -> Result<(), SdkError> {
    let config = TransipConfig::from_env_or_file("TRANSIP")?;
    let client = Transip::new(config)?;

    if !client.test_connection()? {
        eprintln!("API did not answer the connection test");
        return Ok(());
    }

    for domain in client.domains(&[])? {
        let tags = if domain.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", domain.tags.join(", "))
        };
        println!("{} renews {}{}", domain.name, domain.renewal_date, tags);
    }

    Ok(())
}
