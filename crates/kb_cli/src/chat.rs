use kb_core::Result;
use kb_intake::{IntakeSession, Message, QuickReply, Sender, Webhook};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Type your message and press Enter. Pick an option by number or name. /reset starts over, /quit leaves.";

fn render(message: &Message) -> String {
    let who = match message.sender {
        Sender::Bot => "bot",
        Sender::User => "you",
    };
    let mut line = format!("{:>4} │ {}", who, message.text);
    if let Some(link) = &message.link {
        line.push_str(&format!("\n     │ Link to Blog: {}", link));
    }
    line
}

fn render_options(options: &[QuickReply]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("     │   [{}] {}", i + 1, o.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Maps "2" to the second option's key; anything else is passed through.
fn resolve_choice(input: &str, options: &[QuickReply]) -> String {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map(|o| o.key.to_string())
        .unwrap_or_else(|| input.to_string())
}

pub async fn run<W: Webhook>(webhook: W) -> Result<()> {
    let mut session = IntakeSession::new(webhook);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shown = 0;

    println!("{}", HELP);
    loop {
        for message in &session.messages()[shown..] {
            println!("{}", render(message));
        }
        shown = session.messages().len();

        let options = session.conversation().quick_replies().to_vec();
        if !options.is_empty() {
            println!("{}", render_options(&options));
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                shown = 0;
                continue;
            }
            _ => {}
        }

        if session.conversation().input_enabled() {
            session.send(input).await;
        } else if !options.is_empty() && !input.is_empty() {
            if let Err(e) = session.choose(&resolve_choice(input, &options)) {
                println!("     │ {} (pick one of the options above)", e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: [QuickReply; 2] = [
        QuickReply {
            key: "bug_report",
            label: "Report a bug",
        },
        QuickReply {
            key: "general_inquiry",
            label: "General Inquiry",
        },
    ];

    #[test]
    fn test_resolve_choice() {
        assert_eq!(resolve_choice("2", &OPTIONS), "general_inquiry");
        assert_eq!(resolve_choice("0", &OPTIONS), "0");
        assert_eq!(resolve_choice("3", &OPTIONS), "3");
        assert_eq!(resolve_choice("Report a bug", &OPTIONS), "Report a bug");
    }

    #[test]
    fn test_render_options() {
        assert_eq!(
            render_options(&OPTIONS),
            "     │   [1] Report a bug\n     │   [2] General Inquiry"
        );
    }
}
