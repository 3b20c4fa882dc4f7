//! Sign-in commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Password};
use serde_json::json;

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &mut Context) -> Result<()> {
    let email = prompt_if_missing(args.email, "Email")?;
    let password = read_password(args.password_env.as_deref(), false)?;

    let spinner = ctx.output.spinner("Signing in...");
    let result = ctx.shop.session_mut().login(&email, &password).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        let msg = ctx.shop.session().error().map(str::to_string);
        bail!(msg.unwrap_or_else(|| e.to_string()));
    }

    report_signed_in(ctx, &email);
    Ok(())
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &mut Context) -> Result<()> {
    let email = prompt_if_missing(args.email, "Email")?;
    let display_name = prompt_if_missing(args.display_name, "Display name")?;
    let password = read_password(args.password_env.as_deref(), true)?;

    let spinner = ctx.output.spinner("Creating account...");
    let result = ctx
        .shop
        .session_mut()
        .register(&email, &password, &display_name)
        .await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        let msg = ctx.shop.session().error().map(str::to_string);
        bail!(msg.unwrap_or_else(|| e.to_string()));
    }

    report_signed_in(ctx, &email);
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &mut Context) -> Result<()> {
    ctx.shop.session_mut().logout()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "authenticated": false }));
    } else {
        ctx.output.success("Signed out");
    }
    Ok(())
}

/// Run the whoami command.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.shop.session();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "authenticated": session.is_authenticated(),
            "user": session.user(),
            "api": ctx.config.api.base_url,
        }));
        return Ok(());
    }

    if session.is_authenticated() {
        ctx.output.success("Signed in");
        if let Some(user) = session.user() {
            if let Some(name) = user.display_name() {
                ctx.output.kv("name", name);
            }
            ctx.output.kv("role", user.role().as_str());
        }
    } else {
        ctx.output.info("Not signed in. Run `ocha login`.");
    }
    ctx.output.kv("api", &ctx.config.api.base_url);
    Ok(())
}

fn report_signed_in(ctx: &Context, email: &str) {
    let session = ctx.shop.session();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "authenticated": true,
            "user": session.user(),
        }));
        return;
    }

    let name = session
        .user()
        .and_then(|u| u.display_name())
        .unwrap_or(email);
    ctx.output.success(&format!("Signed in as {}", name));
    if session.is_admin() {
        ctx.output.kv("role", "admin");
    }
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

fn read_password(env_var: Option<&str>, confirm: bool) -> Result<String> {
    if let Some(var) = env_var {
        return std::env::var(var).with_context(|| format!("{} is not set", var));
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    let password = prompt.interact()?;
    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}
