use contracts_lib::auth::SignupRequest;

use super::Context;
use super::prompt_line;

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt_line("Password: "),
    }
}

pub async fn login(
    ctx: &Context,
    username: String,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = password_or_prompt(password)?;
    let response = ctx.client.login(username, password).await?;
    let name = response.user.display_name().to_string();
    ctx.session.login(response).await;
    println!("Login successful! Signed in as {name}.");
    Ok(())
}

pub async fn signup(
    ctx: &Context,
    username: String,
    email: String,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = password_or_prompt(password)?;
    let request = SignupRequest {
        username,
        email,
        password,
    };
    let response = ctx.client.signup(&request).await?;
    let name = response.user.display_name().to_string();
    ctx.session.login(response).await;
    println!("Account created successfully! Signed in as {name}.");
    Ok(())
}

pub async fn logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.session.logout().await;
    println!("Logged out successfully");
    Ok(())
}

/// Prints the signed-in user, refreshing the stored profile from the API.
pub async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let user = ctx.client.profile().await?;
    ctx.session.update_user(user.clone()).await;

    println!("{} ({})", user.display_name(), user.initials());
    if let Some(email) = &user.email {
        println!("Email: {email}");
    }
    if let Some(expires) = ctx.session.token().await.and_then(|t| t.expires_at) {
        println!("Session expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
