//! Command line client for the PandaStream API.
//!
//! ```shell
//! export PANDA_CLOUD_ID=... PANDA_ACCESS_KEY=... PANDA_SECRET_KEY=...
//! cargo run --example panda_client -- videos info
//! cargo run --example panda_client -- videos upload --file panda.mp4
//! cargo run --example panda_client -- encodings info --status success
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use http::Response;
use log::debug;
use pandasign_core::{Context, OsEnv};
use pandasign_http_send_reqwest::ReqwestHttpSend;
use pandasign_pandastream::{Client, Config, PandaApi, DEFAULT_API_HOST, DEFAULT_API_PORT};
use serde::{Deserialize, Deserializer};

/// Talk to the PandaStream video encoding API
#[derive(Parser, Debug)]
#[command(name = "panda_client")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PandaStream cloud id
    #[arg(long, global = true, env = "PANDA_CLOUD_ID")]
    cloud_id: Option<String>,

    /// PandaStream access key
    #[arg(long, global = true, env = "PANDA_ACCESS_KEY")]
    access_key: Option<String>,

    /// PandaStream secret key
    #[arg(long, global = true, env = "PANDA_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// API host
    #[arg(long, global = true, default_value = DEFAULT_API_HOST, env = "PANDA_API_HOST")]
    host: String,

    /// API port, 443 means https
    #[arg(long, global = true, default_value_t = DEFAULT_API_PORT, env = "PANDA_API_PORT")]
    port: u16,

    #[command(subcommand)]
    resource: Resource,
}

#[derive(Subcommand, Debug)]
enum Resource {
    /// Manage videos
    Videos {
        #[command(subcommand)]
        command: VideoCommand,
    },
    /// Inspect encodings
    Encodings {
        #[command(subcommand)]
        command: EncodingCommand,
    },
}

#[derive(Subcommand, Debug)]
enum VideoCommand {
    /// List all videos of the cloud
    Info,
    /// Delete one video
    Delete {
        /// Video id
        #[arg(long)]
        id: String,
    },
    /// Upload a local video file
    Upload {
        /// Path of the file to upload
        #[arg(long)]
        file: PathBuf,
        /// Opaque payload stored along with the video
        #[arg(long)]
        payload: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum EncodingCommand {
    /// List encodings
    Info {
        /// Only list encodings with this status
        #[arg(long, default_value = "success")]
        status: String,
    },
}

/// Fields that are missing, null or not a string all read as `None`.
#[derive(Deserialize, Debug)]
struct Video {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    original_filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    error_message: Option<String>,
}

fn lenient_string<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(d)?;
    Ok(v.as_str().map(str::to_string))
}

fn or_na(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("n/a")
}

fn check(resp: Response<String>) -> Result<String> {
    debug!("response: {} {}", resp.status(), resp.body());
    if !resp.status().is_success() {
        bail!("request failed with {}: {}", resp.status(), resp.body());
    }
    Ok(resp.into_body())
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let mut config = Config::new().with_host(cli.host).with_port(cli.port);
    config.cloud_id = cli.cloud_id;
    config.access_key = cli.access_key;
    config.secret_key = cli.secret_key;
    let client = Client::new(ctx, config);

    match cli.resource {
        Resource::Videos { command } => match command {
            VideoCommand::Info => {
                let body = check(client.get("/videos.json", &BTreeMap::new()).await?)?;
                let videos: Vec<Video> = serde_json::from_str(&body)?;

                for video in &videos {
                    println!("Video ID: {}", or_na(&video.id));
                    println!("Original Filename: {}", or_na(&video.original_filename));
                    println!("Status: {}", or_na(&video.status));
                    println!("Error Message: {}", or_na(&video.error_message));
                    println!("============");
                }
            }
            VideoCommand::Delete { id } => {
                let body = check(
                    client
                        .delete(&format!("/videos/{id}.json"), &BTreeMap::new())
                        .await?,
                )?;
                println!("{body}");
            }
            VideoCommand::Upload { file, payload } => {
                let mut params =
                    BTreeMap::from([("file".to_string(), file.to_string_lossy().to_string())]);
                if let Some(payload) = payload {
                    params.insert("payload".to_string(), payload);
                }

                let body = check(client.post("/videos.json", &params).await?)?;
                let video: Video = serde_json::from_str(&body)?;
                println!("Video ID: {}", or_na(&video.id));
                println!("Original filename: {}", or_na(&video.original_filename));
            }
        },
        Resource::Encodings { command } => match command {
            EncodingCommand::Info { status } => {
                let params = BTreeMap::from([("status".to_string(), status)]);
                let body = check(client.get("/encodings.json", &params).await?)?;
                let encodings: serde_json::Value = serde_json::from_str(&body)?;
                println!("{}", serde_json::to_string_pretty(&encodings)?);
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    run(Cli::parse()).await
}
