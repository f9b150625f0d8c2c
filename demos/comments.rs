use lbry_rs_yet::comments::CommentListParams;
use lbry_rs_yet::{CommentsClient, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let comments = CommentsClient::new(Some("https://comments.odysee.tv/api/v2"))?;

    let list = comments
        .comment_list(CommentListParams {
            page: 1,
            page_size: 10,
            claim_id: Some("<claim-id>".to_string()),
            top_level: Some(true),
            ..Default::default()
        })
        .await?;
    println!("{}", list);

    comments.set_server_url(Some(""));
    if let Err(e) = comments.comment_list(CommentListParams::default()).await {
        println!("{}", e);
    }

    Ok(())
}
