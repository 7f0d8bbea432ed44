// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! casedesk-probe: exercise a domain's session model against a live API.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use casedesk_session::utils::logging::init_tracing;
use casedesk_session::{
    AppShell, Config, Credentials, Domain, EventBridge, HttpAuthBackend, HttpTransport,
    NotificationQueue, RouteGuard, SessionStore,
};

#[derive(Parser, Debug)]
#[command(name = "casedesk-probe", version, about = "Inspect CaseDesk session and route decisions")]
struct Cli {
    /// Authority domain: "organization" or "platform"
    #[arg(long, default_value = "organization")]
    domain: Domain,

    /// Override the API base URL from the environment
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the identity check and print the session state
    Whoami,
    /// Log in and print the resulting session state
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Print what the app shell would render for a path
    Guard {
        #[arg(long)]
        path: String,
        /// Roles the route requires (any of)
        #[arg(long)]
        role: Vec<String>,
    },
    /// Print capability access for the given modules
    Access {
        #[arg(long, required = true)]
        module: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    install_panic_hook();

    let mut config = Config::from_env().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config from env, using defaults: {}",
            e
        );
        Config::default()
    });
    if let Some(url) = &cli.base_url {
        config.api_base_url = url.clone();
    }
    init_tracing(&config).map_err(|e| anyhow!("Failed to initialise tracing: {}", e))?;

    let domains = config
        .domain_configs()
        .context("Failed to load route configuration")?;
    let domain_config = domains.get(cli.domain).clone();

    let bridge = EventBridge::new(config.bridge_capacity);
    let transport = HttpTransport::new(&config.api_base_url, cli.domain, bridge.clone(), &config)
        .context("Failed to build transport")?;
    let backend = HttpAuthBackend::new(transport, domain_config.clone());
    let store = SessionStore::from_config(domain_config, backend, &config);
    let _listener = store.attach(&bridge);
    let notices = NotificationQueue::new(config.notification_ttl());

    info!(domain = %cli.domain, base_url = %config.api_base_url, "Probing session");
    store.initialize().await;

    let output = match cli.command {
        Command::Whoami => serde_json::to_value(store.state())?,
        Command::Login { email, password } => {
            let credentials = Credentials::new(email, password);
            match store.login(&credentials).await {
                Ok(_) => {
                    store.refresh().await;
                    serde_json::to_value(store.state())?
                }
                Err(e) => {
                    notices.notify_failure(&e);
                    json!({ "notifications": notices.items() })
                }
            }
        }
        Command::Guard { path, role } => {
            let guard = if role.is_empty() {
                RouteGuard::authenticated()
            } else {
                RouteGuard::require_any_role(role)
            };
            let shell = AppShell::new(store.clone(), guard);
            serde_json::to_value(shell.visit(path.as_str()))?
        }
        Command::Access { module } => {
            let entries: Vec<_> = module
                .iter()
                .map(|m| {
                    let access = store.capability_access(m);
                    json!({ "module": m, "access": access, "hint": access.hint() })
                })
                .collect();
            json!(entries)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}
