use login::{ConfigFinder, Login, LoginOutcome};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(config), Some(user), Some(password)) =
        (args.next(), args.next(), args.next())
    else {
        anyhow::bail!("usage: sign_in <config.yaml> <login> <password>");
    };

    let (login, mut state) = Login::from_config(ConfigFinder::Path(config))?;

    // Stand-in for a UI binding: spinner on, spinner off.
    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let current = *state.borrow_and_update();
            tracing::info!(?current, "login state changed");
        }
    });

    match login.login(user, password).await {
        LoginOutcome::Navigate {
            destination,
            session,
        } => {
            println!("logged in as uid {}, going to {destination}", session.uid());
            println!("{}", serde_json::to_string_pretty(&session)?);
        },
        LoginOutcome::Notify { kind, message } => {
            eprintln!("login failed ({kind:?}): {message}");
        },
    }

    Ok(())
}
