//! Command handlers
//!
//! Each dashboard command goes through the session guard first, the same
//! way the panel routes do.

use crate::cli::{AppUpdateCommand, ClientsCommand, Command, DbCommand, RecordArgs};
use crate::output;
use anyhow::{Context as _, bail};
use appu_client::forms::{self, logout};
use appu_client::{
    AppUpdateForm, ClientConfig, ClientDetail, ClientError, ClientForm, ClientList,
    DatabaseOverview, GuardDecision, ImageFile, LoginForm, PanelApi, PasswordChangeForm, Route,
    Session, SessionGuard, SessionStore,
};
use shared::{AppUpdateChoice, ClientField, ClientRecord, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;

pub struct Context {
    pub config: ClientConfig,
    pub json: bool,
}

/// Authenticated API plus the session it was built from
struct Authed {
    api: PanelApi,
    session: Session,
}

impl Authed {
    /// Clear the session when the backend refused the token
    fn fail(&self, err: ClientError) -> anyhow::Error {
        let err = forms::expire_on_unauthorized(&self.session, err);
        if err.is_auth_failure() {
            anyhow::Error::new(err).context("Run `appu login` to sign in again")
        } else {
            err.into()
        }
    }
}

impl Context {
    fn store(&self) -> SessionStore {
        SessionStore::new(&self.config.session_dir)
    }

    fn guarded(&self, route: Route) -> anyhow::Result<Authed> {
        match SessionGuard::new(self.store()).check(route) {
            GuardDecision::Allow(Some(session)) => Ok(Authed {
                api: PanelApi::for_session(&self.config, &session)?,
                session,
            }),
            GuardDecision::Allow(None) | GuardDecision::Redirect { .. } => {
                tracing::debug!(route = %route, "Redirecting to login");
                bail!("Not logged in; run `appu login` first")
            }
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub async fn run(ctx: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => login(ctx, username, password).await,
        Command::Logout => sign_out(ctx).await,
        Command::Whoami => whoami(ctx),
        Command::Clients(cmd) => clients(ctx, cmd).await,
        Command::Db(DbCommand::Overview) => db_overview(ctx).await,
        Command::AppUpdate(cmd) => app_update(ctx, cmd).await,
        Command::ChangePassword {
            current,
            new_password,
            confirm,
        } => change_password(ctx, current, new_password, confirm).await,
    }
}

// ========== Auth ==========

async fn login(
    ctx: &Context,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    let mut api = PanelApi::from_config(&ctx.config)?;
    let mut form = LoginForm::new(username, password);
    let session = form.submit(&mut api, ctx.store()).await?;
    println!(
        "Logged in as {}",
        session.username().unwrap_or(form.username.as_str())
    );
    Ok(())
}

async fn sign_out(ctx: &Context) -> anyhow::Result<()> {
    let Some(session) = Session::load(ctx.store()) else {
        println!("Not logged in");
        return Ok(());
    };
    let mut api = PanelApi::for_session(&ctx.config, &session)?;
    logout(&mut api, session).await?;
    println!("Logged out");
    Ok(())
}

fn whoami(ctx: &Context) -> anyhow::Result<()> {
    let authed = ctx.guarded(Route::Dashboard)?;
    println!("{}", authed.session.username().unwrap_or("(unknown user)"));
    if let Some(exp) = authed.session.expires_at() {
        println!("Token expires at {exp} (unix time)");
    }
    Ok(())
}

async fn change_password(
    ctx: &Context,
    current: Option<String>,
    new_password: Option<String>,
    confirm: Option<String>,
) -> anyhow::Result<()> {
    let authed = ctx.guarded(Route::ChangePassword)?;
    let current = current.map_or_else(|| prompt("Current password"), Ok)?;
    let new_password = new_password.map_or_else(|| prompt("New password"), Ok)?;
    let confirm = confirm.map_or_else(|| prompt("Confirm new password"), Ok)?;

    let mut form = PasswordChangeForm::new(current, new_password, confirm);
    form.submit(&authed.api, authed.session.clone())
        .await
        .map_err(|e| authed.fail(e))?;
    println!("Password changed. Please log in again.");
    Ok(())
}

// ========== Clients ==========

async fn clients(ctx: &Context, cmd: ClientsCommand) -> anyhow::Result<()> {
    let authed = ctx.guarded(Route::Clients)?;
    let mut list = ClientList::new();
    list.refresh(&authed.api).await.map_err(|e| authed.fail(e))?;

    match cmd {
        ClientsCommand::List => {
            if ctx.json {
                return ctx.print_json(list.clients());
            }
            println!("{}", output::client_rows(&list.rows()));
        }
        ClientsCommand::Show { client_id } => {
            let record = find(&list, &client_id)?;
            if ctx.json {
                return ctx.print_json(record);
            }
            println!("{}", output::client_detail(&ClientDetail::new(&authed.api, record)));
        }
        ClientsCommand::Add(args) => {
            let mut form = ClientForm::add();
            apply_fields(&mut form, &args)?;
            if let Some(path) = &args.image {
                form.select_image(&authed.api, read_image(path).await?).await?;
            }
            let saved = form.submit(&authed.api).await.map_err(|e| authed.fail(e))?;
            println!("Client {} created", display_id(&saved));
        }
        ClientsCommand::Edit { client_id, record } => {
            let mut form = ClientForm::edit(find(&list, &client_id)?.clone());
            apply_fields(&mut form, &record)?;
            if let Some(path) = &record.image {
                form.select_image(&authed.api, read_image(path).await?)
                    .await
                    .map_err(|e| authed.fail(e))
                    .context("Image upload failed")?;
            }
            let saved = form.submit(&authed.api).await.map_err(|e| authed.fail(e))?;
            println!("Client {} updated", display_id(&saved));
        }
        ClientsCommand::Image { client_id, file } => {
            let mut form = ClientForm::edit(find(&list, &client_id)?.clone());
            form.select_image(&authed.api, read_image(&file).await?)
                .await
                .map_err(|e| authed.fail(e))
                .context("Image upload failed")?;
            let saved = form.submit(&authed.api).await.map_err(|e| authed.fail(e))?;
            println!("Client {} image is now {}", display_id(&saved), saved.image);
        }
        ClientsCommand::DownloadImage { client_id, out } => {
            let record = find(&list, &client_id)?;
            if record.image.is_empty() {
                bail!("Client {client_id} has no image");
            }
            let bytes = authed
                .api
                .client_image(&record.image)
                .await
                .map_err(|e| authed.fail(e))?;
            tokio::fs::write(&out, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Saved {} bytes to {}", bytes.len(), out.display());
        }
    }
    Ok(())
}

fn find<'a>(list: &'a ClientList, client_id: &str) -> anyhow::Result<&'a ClientRecord> {
    list.find(client_id)
        .with_context(|| format!("Client {client_id} not found"))
}

fn display_id(record: &ClientRecord) -> &str {
    if record.client_id.is_empty() {
        "(new)"
    } else {
        &record.client_id
    }
}

/// Apply `FIELD=VALUE` assignments in order, stopping at the first refusal
fn apply_fields(form: &mut ClientForm, args: &RecordArgs) -> anyhow::Result<()> {
    for assignment in &args.fields {
        let (name, value) = assignment
            .split_once('=')
            .with_context(|| format!("Expected FIELD=VALUE, got `{assignment}`"))?;
        let field: ClientField = name.trim().parse()?;
        form.set_field(field, value)?;
    }
    Ok(())
}

async fn read_image(path: &Path) -> anyhow::Result<ImageFile> {
    ImageFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

// ========== Database ==========

async fn db_overview(ctx: &Context) -> anyhow::Result<()> {
    let authed = ctx.guarded(Route::DatabaseManagement)?;
    if ctx.json {
        let clients = authed
            .api
            .list_clients()
            .await
            .map_err(|e| authed.fail(e))?;
        return ctx.print_json(&clients);
    }
    let overview = DatabaseOverview::load(&authed.api)
        .await
        .map_err(|e| authed.fail(e))?;
    println!("{}", output::overview(&overview));
    Ok(())
}

// ========== App update ==========

async fn app_update(ctx: &Context, cmd: AppUpdateCommand) -> anyhow::Result<()> {
    let authed = ctx.guarded(Route::Clients)?;
    match cmd {
        AppUpdateCommand::Get { client_id } => {
            let mut form = AppUpdateForm::new(&client_id);
            form.load(&authed.api).await.map_err(|e| authed.fail(e))?;
            if ctx.json {
                return ctx.print_json(form.setting());
            }
            println!("{}", output::app_update(&client_id, form.setting()));
        }
        AppUpdateCommand::Set {
            client_id,
            value,
            link,
        } => {
            let choice: AppUpdateChoice = value.parse()?;
            let mut form = AppUpdateForm::new(&client_id);
            if let Err(e) = form.load(&authed.api).await {
                if e.is_auth_failure() {
                    return Err(authed.fail(e));
                }
                tracing::warn!(client_id = %client_id, error = %e, "Continuing without current setting");
            }
            form.select(choice);
            if choice == AppUpdateChoice::Yes {
                form.set_download_link(link);
            }
            form.submit(&authed.api).await.map_err(|e| authed.fail(e))?;
            println!("{}", output::app_update(&client_id, form.setting()));
        }
    }
    Ok(())
}

/// Read one line from stdin, prompting on stderr
fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
