//! Print the `OpenAPI` document of the ethmetrics API

use api::ApiDoc;
use utoipa::OpenApi;

fn main() -> eyre::Result<()> {
    let openapi = ApiDoc::openapi();
    println!("{}", serde_json::to_string_pretty(&openapi)?);
    Ok(())
}
