//! modgen CLI - Express/Mongoose module generator with documentation sync
//!
//! Scaffolds REST backend modules from field-definition tokens and keeps
//! Postman and OpenAPI documentation aligned with the generated code.

use clap::{Parser, Subcommand};
use modgen::codegen::{create_module, parse_field_tokens};
use modgen::config::{GeneratorConfig, PostmanEnv};
use modgen::docs::{self, DocOptions};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "modgen")]
#[command(version, about = "Express module generator with Mongoose models and documentation sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new module from field definitions
    #[command(alias = "g")]
    Generate {
        /// Module name
        name: String,

        /// Field tokens, e.g. name!:string status:enum[active,inactive],
        /// plus optional `--skip <artifact>...` and `file:true`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,

        /// Path to modules directory (overrides package.json config)
        #[arg(long)]
        modules_dir: Option<PathBuf>,

        /// Path to central routes file (overrides package.json config)
        #[arg(long)]
        routes_file: Option<PathBuf>,

        /// Skip Postman collection generation
        #[arg(long = "no-postman", action = clap::ArgAction::SetFalse)]
        postman: bool,

        /// Skip Swagger documentation generation
        #[arg(long = "no-swagger", action = clap::ArgAction::SetFalse)]
        swagger: bool,

        /// Postman output directory
        #[arg(long, default_value = "postman")]
        postman_dir: PathBuf,

        /// Swagger file path
        #[arg(long, default_value = "swagger.json")]
        swagger_file: PathBuf,
    },

    /// Update Postman and Swagger documentation for existing modules
    #[command(alias = "docs")]
    UpdateDocs {
        /// Module folder names to refresh; empty means all modules
        modules: Vec<String>,

        /// Path to modules directory
        #[arg(long, default_value = "src/app/modules")]
        modules_dir: PathBuf,

        /// Skip Postman collection generation
        #[arg(long = "no-postman", action = clap::ArgAction::SetFalse)]
        postman: bool,

        /// Skip Swagger documentation generation
        #[arg(long = "no-swagger", action = clap::ArgAction::SetFalse)]
        swagger: bool,

        /// Postman output directory
        #[arg(long, default_value = "postman")]
        postman_dir: PathBuf,

        /// Swagger file path
        #[arg(long, default_value = "swagger.json")]
        swagger_file: PathBuf,
    },

    /// Fetch the full remote Postman collection and save it for inspection
    PullCollection {
        /// Output file path
        #[arg(
            short,
            long,
            default_value = "postman/full_collection.postman_collection.json"
        )]
        output: PathBuf,
    },
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            name,
            fields,
            modules_dir,
            routes_file,
            postman,
            swagger,
            postman_dir,
            swagger_file,
        } => generate(
            name,
            fields,
            modules_dir,
            routes_file,
            postman,
            swagger,
            postman_dir,
            swagger_file,
        ),
        Commands::UpdateDocs {
            modules,
            modules_dir,
            postman,
            swagger,
            postman_dir,
            swagger_file,
        } => update_docs(modules, modules_dir, postman, swagger, postman_dir, swagger_file),
        Commands::PullCollection { output } => pull_collection(output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn generate(
    name: String,
    fields: Vec<String>,
    modules_dir: Option<PathBuf>,
    routes_file: Option<PathBuf>,
    postman: bool,
    swagger: bool,
    postman_dir: PathBuf,
    swagger_file: PathBuf,
) -> Result<(), String> {
    let mut config = GeneratorConfig::load(Path::new("."));
    if let Some(dir) = modules_dir {
        config.modules_dir = dir;
    }
    if let Some(file) = routes_file {
        config.routes_file = file;
    }

    let parsed = parse_field_tokens(&fields);
    if parsed.fields.is_empty() {
        println!("⚠ No fields were parsed. Check your command syntax.");
        println!("Example: modgen generate User name:string email:string age:number");
        return Ok(());
    }
    if !parsed.skipped_tokens.is_empty() {
        println!("  ⚠ Skipped unparseable tokens: {}", parsed.skipped_tokens.join(", "));
    }

    let doc_options = DocOptions {
        postman_dir,
        swagger_file,
        update_postman: postman,
        update_swagger: swagger,
        postman_env: PostmanEnv::from_env(),
    };

    create_module(&name, &parsed, &config, &doc_options)
}

fn update_docs(
    modules: Vec<String>,
    modules_dir: PathBuf,
    postman: bool,
    swagger: bool,
    postman_dir: PathBuf,
    swagger_file: PathBuf,
) -> Result<(), String> {
    let doc_options = DocOptions {
        postman_dir,
        swagger_file,
        update_postman: postman,
        update_swagger: swagger,
        postman_env: PostmanEnv::from_env(),
    };
    docs::update_existing_modules_documentation(&modules_dir, &doc_options, &modules)
}

fn pull_collection(output: PathBuf) -> Result<(), String> {
    let env = PostmanEnv::from_env().ok_or(
        "POSTMAN_API_KEY and POSTMAN_COLLECTION_ID must be set to pull the remote collection",
    )?;
    let collection = docs::postman_api::fetch_postman_collection(&env)?;
    docs::postman::save_full_postman_collection(&collection, &output)
}
