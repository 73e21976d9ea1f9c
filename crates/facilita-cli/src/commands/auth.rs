use anyhow::Result;
use facilita_application::AppContext;
use facilita_core::auth::SignupForm;
use facilita_core::user::UserRole;

pub async fn login(ctx: &AppContext, email: &str, password: &str, role: UserRole) -> Result<()> {
    let user = ctx.session().write().await.login(email, password, role).await?;
    println!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

pub async fn signup(ctx: &AppContext, form: &SignupForm) -> Result<()> {
    let user = ctx.session().write().await.signup(form).await?;
    println!("Welcome, {}! Account created as {}.", user.name, user.role);
    Ok(())
}

pub async fn logout(ctx: &AppContext) {
    ctx.session().write().await.logout();
    println!("Signed out.");
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user(&[]).await?;
    println!("{} <{}>", user.name, user.email);
    println!("  id:    {}", user.id);
    println!("  role:  {}", user.role);
    if let Some(phone) = &user.phone {
        println!("  phone: {}", phone);
    }
    println!("  since: {}", user.created_at);
    Ok(())
}
