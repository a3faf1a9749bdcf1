//! Subcommands and their dispatch onto core services.

use crate::upload::image_data_url;
use cardbook_core::db::DbError;
use cardbook_core::{
    resolve, AccountService, AccountType, AuthError, CardTemplate, CatalogService, GalleryFilter,
    KvRepository, ListField, LoggingError, PersonalData, ProfessionalData, ProfileLookup,
    ProfileService, RepoError, Route, RouteDecision, ValidationError,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and sign in
    Register {
        phone: String,
        password: String,
        name: String,
        /// individual|organization
        #[arg(long = "type", value_parser = parse_account_type, default_value = "individual")]
        account_type: AccountType,
    },
    /// Sign in with phone and password
    Login { phone: String, password: String },
    /// Sign out
    Logout,
    /// Show the current session
    Whoami,
    /// Personal form of the signed-in account
    Personal {
        #[command(subcommand)]
        cmd: PersonalCommand,
    },
    /// Professional form of the signed-in account
    Professional {
        #[command(subcommand)]
        cmd: ProfessionalCommand,
    },
    /// Cards of the signed-in account
    Cards {
        #[command(subcommand)]
        cmd: CardsCommand,
    },
    /// List available card templates
    Templates,
    /// Browse published cards
    Gallery {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long = "type", value_parser = parse_account_type)]
        account_type: Option<AccountType>,
    },
    /// Show a public profile
    Profile { username: String },
    /// Check what a path would show for the current session
    Open { path: String },
}

#[derive(Subcommand, Debug)]
pub enum PersonalCommand {
    Show,
    Set(PersonalArgs),
}

#[derive(Args, Debug)]
pub struct PersonalArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    /// Image data URI
    #[arg(long)]
    avatar: Option<String>,
    /// Image file to embed as the avatar
    #[arg(long, conflicts_with = "avatar")]
    avatar_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ProfessionalCommand {
    Show,
    Set(ProfessionalArgs),
    /// Append one skill, service or product
    AddItem {
        #[arg(value_parser = parse_list_field)]
        field: ListField,
        value: String,
    },
    /// Remove the entry at a zero-based position
    RemoveItem {
        #[arg(value_parser = parse_list_field)]
        field: ListField,
        index: usize,
    },
}

#[derive(Args, Debug)]
pub struct ProfessionalArgs {
    #[arg(long)]
    job_title: String,
    #[arg(long)]
    company: String,
    #[arg(long)]
    industry: String,
    #[arg(long)]
    experience: String,
    #[arg(long = "skill")]
    skills: Vec<String>,
    #[arg(long = "service")]
    services: Vec<String>,
    #[arg(long = "product")]
    products: Vec<String>,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long, default_value = "")]
    linked_in: String,
    #[arg(long, default_value = "")]
    portfolio: String,
    #[arg(long, default_value = "")]
    bio: String,
    /// Image data URI
    #[arg(long)]
    company_logo: Option<String>,
    /// Image file to embed as the company logo
    #[arg(long, conflicts_with = "company_logo")]
    company_logo_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CardsCommand {
    List,
    Create {
        #[arg(value_parser = parse_template)]
        template: CardTemplate,
    },
    Activate { card_id: String },
}

#[derive(Debug)]
pub enum CliError {
    Db(DbError),
    Repo(RepoError),
    Auth(AuthError),
    Validation(ValidationError),
    Logging(LoggingError),
    NotSignedIn,
    AlreadySignedIn,
    CardNotFound(String),
    NoProfessionalData,
    ItemNotFound { field: ListField, index: usize },
    Upload { path: String, message: String },
    Output(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::NotSignedIn => write!(f, "not signed in; run `cardbook login` first"),
            Self::AlreadySignedIn => {
                write!(f, "already signed in; run `cardbook logout` first")
            }
            Self::CardNotFound(id) => write!(f, "no card with id `{id}`"),
            Self::NoProfessionalData => write!(
                f,
                "no professional data yet; run `cardbook professional set` first"
            ),
            Self::ItemNotFound { field, index } => {
                write!(f, "no {} entry at position {index}", field.as_str())
            }
            Self::Upload { path, message } => write!(f, "cannot attach `{path}`: {message}"),
            Self::Output(message) => write!(f, "failed to write output: {message}"),
        }
    }
}

impl Error for CliError {}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<AuthError> for CliError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<ValidationError> for CliError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Output(value.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value.to_string())
    }
}

/// Runs one command, writing results to stdout.
pub fn run<R: KvRepository>(repo: &R, command: Command) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(repo, command, &mut out)
}

/// Runs one command, writing results to `out`.
pub fn run_with<R, W>(repo: &R, command: Command, out: &mut W) -> Result<(), CliError>
where
    R: KvRepository,
    W: Write,
{
    let accounts = AccountService::new(repo);
    let profiles = ProfileService::new(repo);

    match command {
        Command::Register {
            phone,
            password,
            name,
            account_type,
        } => {
            require_anonymous(Route::Register, accounts.current_session()?.is_some())?;
            let account = accounts.register(&phone, &password, &name, account_type)?;
            print_json(out, &account.session())
        }
        Command::Login { phone, password } => {
            require_anonymous(Route::Login, accounts.current_session()?.is_some())?;
            let account = accounts.login(&phone, &password)?;
            print_json(out, &account.session())
        }
        Command::Logout => {
            accounts.logout()?;
            writeln!(out, "signed out")?;
            Ok(())
        }
        Command::Whoami => match accounts.current_session()? {
            Some(session) => print_json(out, &session),
            None => {
                writeln!(out, "not signed in")?;
                Ok(())
            }
        },
        Command::Personal { cmd } => {
            let session = accounts.current_session()?.ok_or(CliError::NotSignedIn)?;
            match cmd {
                PersonalCommand::Show => print_json(out, &profiles.get_personal(&session.id)?),
                PersonalCommand::Set(args) => {
                    let data = args.into_personal()?;
                    data.validate()?;
                    profiles.set_personal(&session.id, &data)?;
                    print_json(out, &data)
                }
            }
        }
        Command::Professional { cmd } => {
            let session = accounts.current_session()?.ok_or(CliError::NotSignedIn)?;
            match cmd {
                ProfessionalCommand::Show => {
                    print_json(out, &profiles.get_professional(&session.id)?)
                }
                ProfessionalCommand::Set(args) => {
                    let data = args.into_professional()?;
                    data.validate()?;
                    profiles.set_professional(&session.id, &data)?;
                    print_json(out, &data)
                }
                ProfessionalCommand::AddItem { field, value } => {
                    let mut data = profiles
                        .get_professional(&session.id)?
                        .ok_or(CliError::NoProfessionalData)?;
                    if data.add_item(field, &value) {
                        profiles.set_professional(&session.id, &data)?;
                    }
                    print_json(out, &data)
                }
                ProfessionalCommand::RemoveItem { field, index } => {
                    let mut data = profiles
                        .get_professional(&session.id)?
                        .ok_or(CliError::NoProfessionalData)?;
                    if data.remove_item(field, index).is_none() {
                        return Err(CliError::ItemNotFound { field, index });
                    }
                    profiles.set_professional(&session.id, &data)?;
                    print_json(out, &data)
                }
            }
        }
        Command::Cards { cmd } => {
            let session = accounts.current_session()?.ok_or(CliError::NotSignedIn)?;
            match cmd {
                CardsCommand::List => print_json(out, &profiles.list_cards(&session.id)?),
                CardsCommand::Create { template } => {
                    print_json(out, &profiles.create_card(&session.id, template)?)
                }
                CardsCommand::Activate { card_id } => {
                    if !profiles.set_active_card(&session.id, &card_id)? {
                        return Err(CliError::CardNotFound(card_id));
                    }
                    print_json(out, &profiles.list_cards(&session.id)?)
                }
            }
        }
        Command::Templates => {
            for template in CardTemplate::ALL {
                writeln!(
                    out,
                    "{:<13} {:<13} {}",
                    template.as_str(),
                    template.display_name(),
                    template.description()
                )?;
            }
            Ok(())
        }
        Command::Gallery {
            search,
            industry,
            account_type,
        } => {
            let filter = GalleryFilter {
                search,
                industry,
                account_type,
            };
            let page = CatalogService::new(repo).gallery(&filter)?;
            writeln!(out, "{} of {} cards", page.cards.len(), page.total)?;
            for entry in &page.cards {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    entry.account.username,
                    entry.personal.name,
                    entry.account.account_type.label(),
                    entry.professional.industry,
                    entry.card.template.display_name()
                )?;
            }
            Ok(())
        }
        Command::Profile { username } => match CatalogService::new(repo).public_profile(&username)? {
            ProfileLookup::Found(profile) => print_json(out, &profile),
            ProfileLookup::NotFound => {
                writeln!(out, "Profile Not Found")?;
                Ok(())
            }
        },
        Command::Open { path } => {
            let authenticated = accounts.current_session()?.is_some();
            match resolve(Route::parse(&path), authenticated) {
                RouteDecision::Render(route) => writeln!(out, "render {route:?}")?,
                RouteDecision::Redirect(target) => writeln!(out, "redirect {target}")?,
            }
            Ok(())
        }
    }
}

impl PersonalArgs {
    fn into_personal(self) -> Result<PersonalData, CliError> {
        let avatar = match &self.avatar_file {
            Some(path) => Some(image_data_url(path)?),
            None => self.avatar,
        };
        Ok(PersonalData {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            avatar,
        })
    }
}

impl ProfessionalArgs {
    fn into_professional(self) -> Result<ProfessionalData, CliError> {
        let company_logo = match &self.company_logo_file {
            Some(path) => Some(image_data_url(path)?),
            None => self.company_logo,
        };
        let mut data = ProfessionalData {
            job_title: self.job_title,
            company: self.company,
            industry: self.industry,
            experience: self.experience,
            website: self.website,
            linked_in: self.linked_in,
            portfolio: self.portfolio,
            bio: self.bio,
            company_logo,
            ..ProfessionalData::default()
        };
        for (field, values) in [
            (ListField::Skills, self.skills),
            (ListField::Services, self.services),
            (ListField::Products, self.products),
        ] {
            for value in values {
                data.add_item(field, &value);
            }
        }
        Ok(data)
    }
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn require_anonymous(route: Route, authenticated: bool) -> Result<(), CliError> {
    match resolve(route, authenticated) {
        RouteDecision::Render(_) => Ok(()),
        RouteDecision::Redirect(_) => Err(CliError::AlreadySignedIn),
    }
}

fn parse_account_type(value: &str) -> Result<AccountType, String> {
    AccountType::parse(value).ok_or_else(|| format!("unknown account type `{value}`"))
}

fn parse_list_field(value: &str) -> Result<ListField, String> {
    ListField::parse(value)
        .ok_or_else(|| format!("unknown list `{value}`; expected skills|services|products"))
}

fn parse_template(value: &str) -> Result<CardTemplate, String> {
    CardTemplate::parse(value).ok_or_else(|| {
        let known: Vec<_> = CardTemplate::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown template `{value}`; expected one of {}", known.join("|"))
    })
}
