use lbry_rs_yet::call::{Resolve, Version};
use lbry_rs_yet::media::media_type;
use lbry_rs_yet::params::ClaimSearchParams;
use lbry_rs_yet::{Client, ConnectionMeta, Params, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let client = Client::new(ConnectionMeta::new("http://localhost:5279"))?;

    let status = client.connect().await?;
    println!("{:?}", status);

    let version = client.call(Version).await?;
    println!("{:?}", version);

    let claims = client
        .claim_search(ClaimSearchParams {
            channel: Some("@lbry".to_string()),
            page_size: Some(5),
            ..Default::default()
        })
        .await?;
    println!("{}", claims);

    let resolved = client.call(Resolve::urls(vec!["lbry://@lbry"])).await?;
    for (url, claim) in resolved {
        let file_name = claim["value"]["source"]["name"].as_str();
        let content_type = claim["value"]["source"]["media_type"].as_str();
        println!("{url}: {}", media_type(content_type, file_name));
    }

    // methods without a wrapper are still reachable by name
    let settings = client.call_method("settings_get", Params::new()).await?;
    println!("{}", settings);

    Ok(())
}
