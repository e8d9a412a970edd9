mod terminal;

use std::io::Stdout;
use std::time::Duration;

use atencion_chat::poller::init_chat;
use atencion_chat::{
    ApiError, ChatConfig, ChatController, ChatError, ChatSession, ChatView, ConfigError, ConversationId, FetchOutcome,
    HttpChatApi, MessageId, SendOutcome,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::terminal::TerminalView;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "atencion", about = "Polling chat client for support conversations")]
struct Cli {
    /// Server origin.
    #[arg(long, env = "CHAT_BASE_URL")]
    base_url: Option<String>,

    /// Raw `Cookie` header sent with every request.
    #[arg(long, env = "CHAT_SESSION_COOKIE")]
    cookie: Option<String>,

    /// Act as an operator (encargado).
    #[arg(long)]
    operator: bool,

    /// Poll interval in milliseconds.
    #[arg(long, env = "CHAT_POLL_INTERVAL_MS")]
    poll_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat: each stdin line is sent, `/close` closes the
    /// conversation, `/quit` or EOF exits.
    Chat {
        #[arg(long)]
        conversation: Option<ConversationId>,
        #[arg(long, default_value_t = 0)]
        last_id: MessageId,
    },
    /// Send one message and print it.
    Send {
        text: String,
        #[arg(long)]
        conversation: Option<ConversationId>,
    },
    /// Print messages newer than `--last-id`.
    Fetch {
        #[arg(long)]
        conversation: ConversationId,
        #[arg(long, default_value_t = 0)]
        last_id: MessageId,
    },
    /// Close a conversation (operators only).
    Close {
        #[arg(long)]
        conversation: ConversationId,
    },
}

type Controller = ChatController<HttpChatApi, TerminalView<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let api = HttpChatApi::new(&config)?;
    tracing::debug!(base_url = api.base_url(), operator = config.viewer_is_operator, "chat client configured");

    match cli.command {
        Command::Chat { conversation, last_id } => run_chat(api, &config, conversation, last_id).await,
        Command::Send { text, conversation } => run_send(api, &config, conversation, text).await,
        Command::Fetch { conversation, last_id } => run_fetch(api, &config, conversation, last_id).await,
        Command::Close { conversation } => run_close(api, &config, conversation).await,
    }
}

/// Library defaults and `CHAT_*` variables, then flags. Flags already fall
/// back to their variables, so an explicit flag wins over the environment.
fn resolve_config(cli: &Cli) -> Result<ChatConfig, CliError> {
    let mut config = ChatConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config.base_url = atencion_chat::config::normalize_base_url(base_url);
    }
    if let Some(cookie) = cli.cookie.clone() {
        config.session_cookie = Some(cookie);
    }
    if cli.operator {
        config.viewer_is_operator = true;
    }
    if let Some(poll_ms) = cli.poll_ms {
        if poll_ms == 0 {
            return Err(ConfigError::InvalidValue { var: "--poll-ms", value: "0".into() }.into());
        }
        config.poll_interval = Duration::from_millis(poll_ms);
    }
    Ok(config)
}

fn controller(api: HttpChatApi, config: &ChatConfig, session: ChatSession) -> Controller {
    ChatController::new(api, TerminalView::new(std::io::stdout()), session, config.viewer_is_operator)
}

async fn run_chat(
    api: HttpChatApi,
    config: &ChatConfig,
    conversation: Option<ConversationId>,
    last_id: MessageId,
) -> Result<(), CliError> {
    let view = TerminalView::new(std::io::stdout());
    let (ctrl, poller) =
        init_chat(api, view, config.viewer_is_operator, conversation, last_id, config.poll_interval).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let result = loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(e) => break Err(CliError::Io(e)),
        };
        let command = line.trim();
        if command == "/quit" {
            break Ok(());
        }
        if command == "/close" {
            close_from_prompt(&ctrl).await;
            continue;
        }
        ctrl.with_view(|view| view.set_input(line));
        // Failures are already logged and shown to the user.
        let _ = ctrl.send_message().await;
    };

    poller.stop().await;
    result
}

async fn close_from_prompt(ctrl: &Controller) {
    match ctrl.close_conversation().await {
        Ok(id) => eprintln!("conversation {id} closed"),
        Err(e @ (ChatError::NotOperator | ChatError::NoConversation)) => {
            ctrl.with_view(|view| view.alert(&e.to_string()));
        }
        Err(_) => {}
    }
}

async fn run_send(
    api: HttpChatApi,
    config: &ChatConfig,
    conversation: Option<ConversationId>,
    text: String,
) -> Result<(), CliError> {
    let ctrl = controller(api, config, ChatSession::new(conversation, 0));
    ctrl.with_view(|view| view.set_input(text));
    match ctrl.send_message().await? {
        SendOutcome::Empty => eprintln!("nothing to send"),
        SendOutcome::Sent { id, conversation_id } => {
            let conversation = conversation_id.map_or_else(|| "unknown".to_owned(), |c| c.to_string());
            eprintln!("sent message {id} in conversation {conversation}");
        }
    }
    Ok(())
}

async fn run_fetch(
    api: HttpChatApi,
    config: &ChatConfig,
    conversation: ConversationId,
    last_id: MessageId,
) -> Result<(), CliError> {
    let ctrl = controller(api, config, ChatSession::new(Some(conversation), last_id));
    if let FetchOutcome::Appended(count) = ctrl.fetch_new_messages().await? {
        eprintln!("{count} new message(s), last id {}", ctrl.session().last_seen_id());
    }
    Ok(())
}

async fn run_close(api: HttpChatApi, config: &ChatConfig, conversation: ConversationId) -> Result<(), CliError> {
    let ctrl = controller(api, config, ChatSession::new(Some(conversation), 0));
    let closed = ctrl.close_conversation().await?;
    eprintln!("conversation {closed} closed");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
