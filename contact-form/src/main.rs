use clap::{Parser, ValueEnum};

use std::process::ExitCode;

use contact_form::{
    ContactForm, FormStatus, FormVariant, HttpContactApi, SubmitOutcome, form::SENDING_LABEL,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Page {
    /// Home page form, with a subject field
    Home,
    /// Dedicated contact page form
    Contact,
}

impl From<Page> for FormVariant {
    fn from(page: Page) -> Self {
        match page {
            Page::Home => Self::HOME,
            Page::Contact => Self::CONTACT_PAGE,
        }
    }
}

/// Send a message through the portfolio contact form.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the contact service
    #[arg(long, env = "CONTACT_SERVICE_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Which form to submit through
    #[arg(long, value_enum, default_value_t = Page::Contact)]
    page: Page,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    /// Only sent by the home page form
    #[arg(long, default_value = "")]
    subject: String,

    #[arg(long)]
    message: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();

    let form = ContactForm::new(HttpContactApi::new(cli.url.clone()), cli.page.into());
    form.edit(|fields| {
        fields.name = cli.name;
        fields.email = cli.email;
        fields.subject = cli.subject;
        fields.message = cli.message;
    });

    println!("{SENDING_LABEL}");

    match form.submit().await {
        SubmitOutcome::Settled(FormStatus::Success(message)) => {
            println!("[success] {message}");
            ExitCode::SUCCESS
        }
        SubmitOutcome::Settled(FormStatus::Error(message)) => {
            println!("[error] {message}");
            ExitCode::FAILURE
        }
        SubmitOutcome::Settled(FormStatus::None) | SubmitOutcome::Ignored => {
            eprintln!("submission did not settle");
            ExitCode::FAILURE
        }
    }
}
