// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::error;

use crate::{
    error::{self, Result},
    guard::{self, RouteClass, Verdict},
    model::Profile,
    password,
    rest::Transport,
    store::{Outcome, Store},
};

pub(crate) mod account;
pub(crate) mod export;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod logs;
pub(crate) mod passwd;
pub(crate) mod profile;
pub(crate) mod register;
pub(crate) mod role;
pub(crate) mod user;
pub(crate) mod whoami;

/// Everything a command needs: the session store, the raw transport for
/// administrative endpoints, and the password prompt chain.
pub(crate) struct Context {
    pub(crate) store: Store<Transport>,
    pub(crate) transport: Transport,
    pub(crate) prompts: Vec<Box<dyn password::Prompt>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, cx: Context) -> Result<()>;
}

/// Runs the access guard for the command's route class and renders a denial
/// as a command failure.
pub(crate) async fn ensure_route(cx: &mut Context, route: RouteClass) -> Result<()> {
    match guard::evaluate(&mut cx.store, route).await {
        Verdict::Allow => Ok(()),
        Verdict::Redirect {
            notice: Some(notice),
            ..
        } => Err(notice.into()),
        Verdict::Redirect { .. } => {
            error!("you are already signed in; run the logout command first");
            Err(error::Error::Command)
        }
    }
}

/// Prints a profile as labeled lines, with "-" standing in for fields the
/// owner has not filled in.
pub(crate) fn print_profile(profile: &Profile) {
    let line = |label: &str, value: Option<&str>| {
        println!("{label}: {}", value.unwrap_or("-"));
    };

    line("Username", profile.username.as_deref());
    line("Phone", profile.phone.as_deref());
    line("Email", profile.email.as_deref());
    line("Real name", profile.real_name.as_deref());
    match profile.gender {
        Some(gender) => println!("Gender: {gender}"),
        None => println!("Gender: -"),
    }
    line("Birthday", profile.birthday.as_deref());
    line("Avatar", profile.avatar.as_deref());
}

/// Prints the success message or surfaces the store's failure message.
pub(crate) fn finish(outcome: Outcome, success: &str) -> Result<()> {
    match outcome {
        Outcome::Success(()) => {
            println!("{success}");
            Ok(())
        }
        Outcome::Failure { message } => {
            error!("{}", message);
            Err(error::Error::Command)
        }
    }
}
