// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod client;
mod command;
mod error;
mod guard;
mod metadata;
mod model;
mod password;
mod rest;
mod session;
mod storage;
mod store;

use std::{process, sync::Arc};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{error, warn};
use tokio::sync::Mutex;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Logout(command::logout::Command),
    Register(command::register::Command),
    Whoami(command::whoami::Command),
    Passwd(command::passwd::Command),
    Profile(command::profile::Command),
    Account(command::account::Command),
    User(command::user::Command),
    Role(command::role::Command),
    Export(command::export::Command),
    Logs(command::logs::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, cx: command::Context) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(cx).await,
            Self::Logout(cmd) => cmd.execute(cx).await,
            Self::Register(cmd) => cmd.execute(cx).await,
            Self::Whoami(cmd) => cmd.execute(cx).await,
            Self::Passwd(cmd) => cmd.execute(cx).await,
            Self::Profile(cmd) => cmd.execute(cx).await,
            Self::Account(cmd) => cmd.execute(cx).await,
            Self::User(cmd) => cmd.execute(cx).await,
            Self::Role(cmd) => cmd.execute(cx).await,
            Self::Export(cmd) => cmd.execute(cx).await,
            Self::Logs(cmd) => cmd.execute(cx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the console API server.
    #[arg(long, env = "USERCTL_URL", default_value = "http://127.0.0.1:8080", value_parser = Url::parse)]
    url: Url,

    /// Keep the session token out of durable storage for this invocation.
    #[arg(long)]
    no_cache_token: bool,

    #[clap(subcommand)]
    command: Command,
}

async fn get_token_storage(args: &Args) -> Box<dyn storage::Storage<String>> {
    if !args.no_cache_token {
        #[cfg(feature = "secret-service")]
        match storage::SecretService::new(&args.url).await {
            Ok(secret_service_storage) => return Box::new(secret_service_storage),
            Err(e) => {
                warn!("We need to fall back to unencrypted file storage because we can't connect to the secret service: {}", e);
            }
        }

        #[cfg(feature = "keychain")]
        match storage::Keychain::new(&args.url) {
            Ok(keychain_storage) => return Box::new(keychain_storage),
            Err(e) => {
                warn!("We need to fall back to unencrypted file storage because we can't connect to Keychain: {}", e);
            }
        }

        if let Some(file_storage) = storage::Plain::new("token") {
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::new())
}

fn get_snapshot_storage(args: &Args) -> Box<dyn storage::Storage<session::Data>> {
    if !args.no_cache_token {
        if let Some(file_storage) = storage::File::new("session.json") {
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let token_storage: Arc<Mutex<Box<dyn storage::Storage<String>>>> =
        Arc::new(Mutex::new(get_token_storage(&args).await));
    let snapshot_storage = get_snapshot_storage(&args);

    let transport = rest::Transport::new(args.url.clone(), Arc::clone(&token_storage))?;
    let mut store = store::Store::new(transport.clone(), token_storage, snapshot_storage);
    store.hydrate().await;

    let prompts: Vec<Box<dyn password::Prompt>> = vec![Box::new(password::RpasswordPrompt)];

    let cx = command::Context {
        store,
        transport,
        prompts,
    };

    command::Command::execute(args.command, cx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("USERCTL_LOG", "warn")
        .write_style("USERCTL_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
