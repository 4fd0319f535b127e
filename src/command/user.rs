// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::error;
use secrecy::SecretString;
use tabled::{settings::Style, Table};

use crate::{
    client::UserUpdate,
    error::{self, Result},
    guard::RouteClass,
    model::{Gender, StatusFilter, User},
    password::{self, RequestBuilder},
    rest::{
        api::{profile, user, Endpoint as _},
        envelope::Page,
    },
};

use super::Context;

/// Administer user accounts.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List accounts, one page at a time.
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,

        #[arg(long, default_value_t = 10)]
        size: u64,
    },

    /// Look up one account by its numeric ID.
    Get {
        #[clap()]
        id: i64,
    },

    /// Look up one account by username.
    Find {
        #[clap()]
        username: String,
    },

    /// Show the profile attached to an account.
    Profile {
        #[clap()]
        id: i64,
    },

    /// Find a profile by the owner's real name.
    FindProfile {
        #[clap()]
        real_name: String,
    },

    /// Search accounts by column filters.
    Search {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusFilter>,

        /// Match against the comma-joined roles descriptor.
        #[arg(long)]
        roles: Option<String>,

        /// Only accounts created at or after this timestamp.
        #[arg(long)]
        created_after: Option<String>,

        /// Only accounts created at or before this timestamp.
        #[arg(long)]
        created_before: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u64,

        #[arg(long, default_value_t = 10)]
        size: u64,
    },

    /// Create an account.
    Create {
        #[clap()]
        username: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Role ID to assign; repeat for multiple roles.
        #[arg(long = "role-id")]
        role_ids: Vec<i64>,

        /// Use this password instead of prompting for one.
        #[arg(long, env = "USERCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Update account fields; flags you leave out stay untouched.
    Update {
        #[clap()]
        id: i64,

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

        #[arg(long)]
        birthday: Option<String>,
    },

    /// Replace an account's role assignments.
    Roles {
        #[clap()]
        id: i64,

        /// The new set of role IDs.
        #[clap(required = true)]
        role_ids: Vec<i64>,
    },

    /// Set a new password for an account.
    ResetPassword {
        #[clap()]
        id: i64,

        /// Use this password instead of prompting for one.
        #[arg(long, env = "USERCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Ban an account.
    Block {
        #[clap()]
        id: i64,
    },

    /// Lift a ban.
    Unblock {
        #[clap()]
        id: i64,
    },

    /// Logically delete an account.
    Delete {
        #[clap()]
        id: i64,

        /// Skip the confirmation check.
        #[arg(long)]
        yes: bool,
    },
}

fn print_user(user: &User) {
    println!("{}", Table::new([user]).with(Style::rounded()));
}

fn print_page(page: &Page<User>) {
    if page.rows.is_empty() {
        println!("No matching accounts.");
        return;
    }
    println!("{}", Table::new(&page.rows).with(Style::rounded()));
    println!(
        "Page {} of {} ({} accounts total).",
        page.page_num,
        page.pages(),
        page.total
    );
}

async fn read_password(cx: &Context, given: Option<String>) -> Result<SecretString> {
    match given {
        Some(password) => Ok(SecretString::new(password)),
        None => {
            password::read(
                &cx.prompts,
                RequestBuilder::new("Password")
                    .with_confirmation()
                    .into_request(),
            )
            .await
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::admin()).await?;

        match self.action {
            Action::List { page, size } => {
                let listing = user::List {
                    page_num: page,
                    page_size: size,
                }
                .execute(&cx.transport)
                .await?;
                print_page(&listing);
            }

            Action::Get { id } => {
                let found = user::GetById { user_id: id }.execute(&cx.transport).await?;
                print_user(&found);
            }

            Action::Find { username } => {
                let found = user::GetByUsername {
                    username: &username,
                }
                .execute(&cx.transport)
                .await?;
                print_user(&found);
            }

            Action::Profile { id } => {
                let found = profile::ProfileByUserId { user_id: id }
                    .execute(&cx.transport)
                    .await?;
                super::print_profile(&found);
            }

            Action::FindProfile { real_name } => {
                let found = profile::ProfileByRealName {
                    real_name: &real_name,
                }
                .execute(&cx.transport)
                .await?;
                super::print_profile(&found);
            }

            Action::Search {
                username,
                phone,
                email,
                status,
                roles,
                created_after,
                created_before,
                page,
                size,
            } => {
                let filter = user::SearchFilter {
                    username,
                    phone,
                    email,
                    status,
                    roles,
                    create_time_start: created_after,
                    create_time_end: created_before,
                };
                let listing = user::Search {
                    filter: &filter,
                    page_num: page,
                    page_size: size,
                }
                .execute(&cx.transport)
                .await?;
                print_page(&listing);
            }

            Action::Create {
                username,
                phone,
                email,
                role_ids,
                password,
            } => {
                let password = read_password(&cx, password).await?;
                let created = user::Create {
                    username: &username,
                    password: &password,
                    phone: phone.as_deref(),
                    email: email.as_deref(),
                    role_ids: &role_ids,
                }
                .execute(&cx.transport)
                .await?;
                print_user(&created);
            }

            Action::Update {
                id,
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
                let updated = user::Update {
                    user_id: id,
                    update: &update,
                }
                .execute(&cx.transport)
                .await?;
                print_user(&updated);
            }

            Action::Roles { id, role_ids } => {
                let updated = user::ChangeRoles {
                    user_id: id,
                    role_ids: &role_ids,
                }
                .execute(&cx.transport)
                .await?;
                print_user(&updated);
            }

            Action::ResetPassword { id, password } => {
                let password = read_password(&cx, password).await?;
                let updated = user::ResetPassword {
                    user_id: id,
                    new_password: &password,
                }
                .execute(&cx.transport)
                .await?;
                print_user(&updated);
            }

            Action::Block { id } => {
                let updated = user::Block { user_id: id }.execute(&cx.transport).await?;
                print_user(&updated);
            }

            Action::Unblock { id } => {
                let updated = user::Unblock { user_id: id }.execute(&cx.transport).await?;
                print_user(&updated);
            }

            Action::Delete { id, yes } => {
                if !yes {
                    error!("deleting an account cannot be undone; re-run with --yes to confirm");
                    return Err(error::Error::Cancelled);
                }
                let affected = user::Delete { user_id: id }.execute(&cx.transport).await?;
                println!("Deleted {affected} account(s).");
            }
        }

        Ok(())
    }
}
