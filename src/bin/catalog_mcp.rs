//! Pokedex Catalog MCP Server
//!
//! A Model Context Protocol server (rmcp, stdio transport) that exposes
//! the catalog's CRUD and comparison operations as tools.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pokedex_catalog::mcp_interface::*;
use pokedex_catalog::{
    config, import_file, Catalog, CatalogConfig, CatalogError, ImportOptions, MemoryStore,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};

#[derive(Parser)]
#[command(name = "pokedex-catalog-mcp")]
#[command(about = "Serve the Pokemon catalog over MCP on stdio", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/pokedex-catalog/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PokedexCatalogService {
    tool_router: ToolRouter<PokedexCatalogService>,
    catalog: Arc<Catalog<MemoryStore>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordIdRequest {
    #[schemars(description = "Pokedex id of the record")]
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRequest {
    #[schemars(description = "The record as a JSON object; must include an id")]
    pub record: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRequest {
    #[schemars(description = "Pokedex id of the record to update")]
    pub id: i64,
    #[schemars(description = "JSON object whose top-level fields replace the stored ones")]
    pub patch: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompareRequest {
    #[schemars(description = "Pokedex id of the first record")]
    pub id1: i64,
    #[schemars(description = "Pokedex id of the second record")]
    pub id2: i64,
}

fn tool_error(context: &str, error: CatalogError) -> McpError {
    let code = match FailureKind::of(&error) {
        FailureKind::NotFound => ErrorCode(-32002),
        FailureKind::InvalidParams => ErrorCode(-32602),
        FailureKind::Internal => ErrorCode(-32603),
    };
    log::warn!("{} failed: {}", context, error);
    McpError {
        code,
        message: Cow::from(format!("Error {}: {}", context, error)),
        data: None,
    }
}

fn reply(context: &str, result: Result<String, CatalogError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => Err(tool_error(context, e)),
    }
}

#[tool_router]
impl PokedexCatalogService {
    pub fn new(catalog: Arc<Catalog<MemoryStore>>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            catalog,
        }
    }

    #[tool(description = "List every Pokemon in canonical form")]
    async fn list_pokemon(&self) -> Result<CallToolResult, McpError> {
        reply("listing Pokemon", list_records_json(&self.catalog))
    }

    #[tool(description = "Get one Pokemon by id in canonical form")]
    async fn get_pokemon(
        &self,
        Parameters(request): Parameters<RecordIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply("getting Pokemon", get_record_json(&self.catalog, request.id))
    }

    #[tool(description = "Create a Pokemon from a JSON record")]
    async fn create_pokemon(
        &self,
        Parameters(request): Parameters<CreateRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "creating Pokemon",
            create_record_json(&self.catalog, &request.record),
        )
    }

    #[tool(description = "Update top-level fields of a stored Pokemon")]
    async fn update_pokemon(
        &self,
        Parameters(request): Parameters<UpdateRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "updating Pokemon",
            update_record_json(&self.catalog, request.id, &request.patch),
        )
    }

    #[tool(description = "Delete a Pokemon and return its last state")]
    async fn delete_pokemon(
        &self,
        Parameters(request): Parameters<RecordIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "deleting Pokemon",
            delete_record_json(&self.catalog, request.id),
        )
    }

    #[tool(description = "Compare two Pokemon by stats and type effectiveness")]
    async fn compare_pokemon(
        &self,
        Parameters(request): Parameters<CompareRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "comparing Pokemon",
            compare_records_json(&self.catalog, request.id1, request.id2),
        )
    }
}

#[tool_handler]
impl ServerHandler for PokedexCatalogService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = CatalogConfig::load(cli.config.as_deref())?;
    config::init_logging(&settings);

    log::info!("Pokedex Catalog MCP Server starting...");

    let chart = Arc::new(settings.load_type_chart()?);
    let catalog = Catalog::new(MemoryStore::new(), chart);
    match &settings.seed_file {
        Some(seed) => {
            import_file(
                catalog.store(),
                seed,
                &ImportOptions::new(settings.asset_base_url.as_str()),
            )?;
        }
        None => log::info!("No seed file configured; starting with an empty catalog"),
    }

    let service = PokedexCatalogService::new(Arc::new(catalog));
    let transport = (stdin(), stdout());

    log::info!("Starting MCP server with transport...");
    let server = service.serve(transport).await?;

    let quit_reason = server.waiting().await?;

    log::info!("Pokedex Catalog MCP Server exiting: {:?}", quit_reason);
    Ok(())
}
