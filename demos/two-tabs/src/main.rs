use stride::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Demo backend
// ---------------------------------------------------------------------------

/// Accepts any address with the password `demo`.
struct DemoAuth;

impl Authenticator for DemoAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, SessionError> {
        if credentials.password != "demo" {
            return Err(SessionError::AuthFailed("Usuário ou senha incorretos.".into()));
        }
        Ok(LoginResponse {
            access_token: format!("demo-{}", credentials.email),
            user: UserRecord {
                id: UserId(1),
                name: "Demo Coach".into(),
                email: credentials.email.clone(),
            },
        })
    }
}

fn show(label: &str, observer: &AuthObserver) {
    println!("  {label:<8} {}", observer.state());
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), StrideError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let origin = Origin::new();
    let tab_a = Dashboard::builder().tab(origin.open_tab()).build(DemoAuth)?;
    let tab_b = Dashboard::builder().tab(origin.open_tab()).build(DemoAuth)?;

    let header_a = tab_a.mount_observer();
    let header_b = tab_b.mount_observer();
    println!("two tabs open, nobody signed in");
    show("tab A", &header_a);
    show("tab B", &header_b);

    let mut history_b = History::new("/");
    println!("tab B opens /alunos: {:?}", tab_b.navigate(&mut history_b, "/alunos"));

    if let Err(e) = tab_a.sign_in(&Credentials::new("rita@stride.run", "nope"), true).await {
        println!("wrong password: {e}");
    }

    let user = tab_a
        .sign_in(&Credentials::new("rita@stride.run", "demo"), true)
        .await?;
    println!("tab A signed in as {} ({}), remember me on", user.name, user.id);
    show("tab A", &header_a);
    show("tab B", &header_b);

    println!("tab B opens /alunos: {:?}", tab_b.navigate(&mut history_b, "/alunos"));

    tab_b.logout();
    println!("tab B logged out");
    show("tab A", &header_a);
    show("tab B", &header_b);

    println!("tab A opens /treinos: {:?}", tab_a.navigate(&mut History::new("/"), "/treinos"));
    Ok(())
}
