mod notify;

use clap::{Args, Parser, Subcommand};
use minotify::{Notification, NotificationBuilder, Urgency};
use std::{fs, io::Write, path::PathBuf, time::Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity"
    )]
    verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "MS",
        help = "Give up waiting for the notification server after MS milliseconds"
    )]
    deadline: Option<u64>,

    #[command(subcommand)]
    command: NotifyCommand,
}

#[derive(Subcommand)]
enum NotifyCommand {
    #[command(about = "Send a notification")]
    Send(SendArgs),

    #[command(about = "Send two sample notifications")]
    Demo,
}

#[derive(Args)]
struct SendArgs {
    #[arg(help = "Title line")]
    summary: Option<String>,

    #[arg(help = "Detail text")]
    body: Option<String>,

    #[arg(short, long, help = "Application name")]
    app_name: Option<String>,

    #[arg(short, long, help = "Icon name or path")]
    icon: Option<String>,

    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        help = "Expiration in milliseconds, -1 for server default, 0 to never expire"
    )]
    timeout: Option<i32>,

    #[arg(short, long, value_parser = parse_urgency, help = "low, normal, critical or a raw value")]
    urgency: Option<u8>,

    #[arg(long, value_name = "KEY:LABEL", value_parser = parse_action)]
    action: Vec<(String, String)>,

    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_hint)]
    hint: Vec<(String, String)>,

    #[arg(long, help = "Read the notification from a JSON file, flags override it")]
    json: Option<PathBuf>,

    #[arg(long, help = "Print the notification as JSON instead of sending it")]
    print: bool,
}

impl SendArgs {
    fn notification(self) -> anyhow::Result<Notification> {
        let mut builder = match (&self.json, self.app_name) {
            (Some(path), app_name) => {
                let mut description: serde_json::Value =
                    serde_json::from_str(&fs::read_to_string(path)?)?;
                if let (Some(app_name), Some(fields)) = (app_name, description.as_object_mut()) {
                    fields.insert("app_name".to_string(), app_name.into());
                }
                serde_json::from_value::<NotificationBuilder>(description)?
            }
            (None, Some(app_name)) => NotificationBuilder::new(app_name),
            (None, None) => NotificationBuilder::default(),
        };

        if let Some(summary) = self.summary {
            builder = builder.summary(summary);
        }
        if let Some(body) = self.body {
            builder = builder.body(body);
        }
        if let Some(icon) = self.icon {
            builder = builder.icon(icon);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(urgency) = self.urgency {
            builder = builder.urgency(urgency);
        }

        let builder = self
            .action
            .into_iter()
            .fold(builder, |builder, (key, label)| builder.action(key, label));
        let builder = self
            .hint
            .into_iter()
            .fold(builder, |builder, (key, value)| builder.hint(key, value));

        Ok(builder.build())
    }
}

fn parse_urgency(s: &str) -> Result<u8, String> {
    match s.to_ascii_lowercase().as_str() {
        "low" => Ok(Urgency::Low.into()),
        "normal" => Ok(Urgency::Normal.into()),
        "critical" => Ok(Urgency::Critical.into()),
        other => other
            .parse()
            .map_err(|_| format!("Invalid urgency: {s}")),
    }
}

fn parse_action(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .ok_or_else(|| format!("Expected KEY:LABEL, got {s}"))
}

fn parse_hint(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("Expected KEY=VALUE, got {s}"))
}

fn demo() -> Vec<Notification> {
    vec![
        Notification::builder()
            .summary("Hello KDE")
            .body("This is a notification")
            .build(),
        NotificationBuilder::new("MyApp")
            .summary("Complex Notification")
            .body("This is a notification with actions and hints")
            .icon("dialog-warning")
            .timeout(10000)
            .action("action1", "Click Me")
            .action("action2", "Cancel")
            .hint("sound-file", "/usr/share/sounds/notification.wav")
            .urgency(Urgency::Critical)
            .build(),
    ]
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let deadline = cli.deadline.map(Duration::from_millis);

    match cli.command {
        NotifyCommand::Send(args) => {
            let print = args.print;
            let notification = args.notification()?;
            if print {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", serde_json::to_string_pretty(&notification)?)?;
            } else {
                notify::emit(vec![notification], deadline)?;
            }
        }
        NotifyCommand::Demo => notify::emit(demo(), deadline)?,
    }

    Ok(())
}
