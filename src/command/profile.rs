// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::warn;

use crate::{
    client::UserUpdate,
    error::{self, Result},
    guard::RouteClass,
    model::Gender,
    rest::api::profile::UploadAvatar,
    store::Outcome,
};

use super::Context;

/// Inspect or edit the signed-in user's profile.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Print the stored profile.
    Show {
        /// Fetch fresh identity and profile data first.
        #[arg(long)]
        refresh: bool,
    },

    /// Update profile fields; flags you leave out stay untouched.
    Update {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        real_name: Option<String>,

        #[arg(long, value_enum)]
        gender: Option<Gender>,

        /// Birthday as an ISO-8601 date.
        #[arg(long)]
        birthday: Option<String>,
    },

    /// Upload a new avatar image.
    Avatar {
        /// Path to the image file.
        #[clap()]
        file: PathBuf,
    },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::authenticated()).await?;

        match self.action {
            Action::Show { refresh } => {
                if refresh {
                    if let Outcome::Failure { message } = cx.store.refresh_identity().await {
                        log::error!("could not refresh the profile: {}", message);
                        return Err(error::Error::Command);
                    }
                }

                match cx.store.profile() {
                    Some(profile) => super::print_profile(profile),
                    None => println!("No profile on record."),
                }
                Ok(())
            }

            Action::Update {
                username,
                phone,
                email,
                real_name,
                gender,
                birthday,
            } => {
                let update = UserUpdate {
                    username,
                    phone,
                    email,
                    real_name,
                    gender,
                    birthday,
                    avatar: None,
                };
                super::finish(cx.store.update_profile(&update).await, "Profile updated.")
            }

            Action::Avatar { file } => {
                let bytes = fs::read(&file)?;
                let file_name = file
                    .file_name()
                    .map_or_else(|| "avatar".to_owned(), |name| name.to_string_lossy().into_owned());

                let path = UploadAvatar { file_name, bytes }.execute(&cx.transport).await?;
                println!("Avatar uploaded to {path}.");

                // Re-cache the profile so the snapshot reflects the new
                // avatar; the upload itself already succeeded.
                if let Outcome::Failure { message } = cx.store.refresh_identity().await {
                    warn!("could not refresh the cached profile: {}", message);
                }
                Ok(())
            }
        }
    }
}
