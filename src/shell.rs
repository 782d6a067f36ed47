//! Line-oriented text front end over [`Controller`].

use std::fmt::Write as _;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::config::LoginField;
use crate::controller::{Controller, Screen};
use crate::jokes;

const HEART_FULL: &str = "\u{2764}";
const HEART_EMPTY: &str = "\u{2661}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    controller: Controller,
}

impl Shell {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn render(&self) -> String {
        let ctl = &self.controller;
        let mut out = String::new();
        let screen = ctl.screen();

        let _ = writeln!(out, "== {} ==", screen.title());
        match screen {
            Screen::Entry => {
                out.push_str("  login     open the login form\n");
                out.push_str("  signup    create an account\n");
            }
            Screen::Login | Screen::SignUp => {
                let label = match ctl.login_field() {
                    LoginField::Username => "Username",
                    LoginField::Email => "Email",
                };
                let form = ctl.form();
                let _ = writeln!(out, "  {label}: {}", form.username);
                let _ = writeln!(out, "  Password: {}", "*".repeat(form.password.chars().count()));
                out.push_str("  username <value> | password <value> | submit | back\n");
            }
            Screen::Categories => {
                if let Some(user) = ctl.session() {
                    let _ = writeln!(out, "Welcome, {}!", user.username);
                }
                for (i, category) in jokes::categories().iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, category.name);
                }
                out.push_str("  update | delete | favorites | logout\n");
            }
            Screen::CategoryJokes(id) => {
                for (i, joke) in jokes::get(id).jokes.iter().enumerate() {
                    let heart = if ctl.is_favorite(joke) { HEART_FULL } else { HEART_EMPTY };
                    let _ = writeln!(out, "  {}. {} {}", i + 1, joke, heart);
                }
                out.push_str("  <number> to favorite | favorites | back\n");
            }
            Screen::UpdatePassword => {
                let stars = "*".repeat(ctl.form().password.chars().count());
                let _ = writeln!(out, "  New Password: {stars}");
                out.push_str("  password <value> | submit | cancel\n");
            }
        }

        if ctl.favorites_open() {
            out.push_str("-- Your Favorite Jokes --\n");
            if ctl.list_favorites().is_empty() {
                out.push_str("  (none yet)\n");
            }
            for joke in ctl.list_favorites() {
                let _ = writeln!(out, "  * {joke}");
            }
            out.push_str("  close\n");
        }
        if ctl.confirm_delete_pending() {
            out.push_str(
                "Are you sure you want to delete your account? This action cannot be undone. (yes/no)\n",
            );
        }
        if let Some(error) = ctl.error() {
            let _ = writeln!(out, "! {error}");
        }
        if let Some(notice) = ctl.notice() {
            let _ = writeln!(out, "> {notice}");
        }
        out
    }

    pub async fn handle_line(&mut self, line: &str) -> Flow {
        // Arguments are kept byte for byte after the first separator.
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, rest)) => (c, rest),
            None => (line.trim_end(), ""),
        };
        debug!(%command, screen = ?self.controller.screen(), "shell command");

        if matches!(command, "quit" | "q") {
            return Flow::Quit;
        }
        if command.is_empty() {
            return Flow::Continue;
        }

        let ctl = &mut self.controller;
        if ctl.confirm_delete_pending() {
            match command {
                "yes" | "y" => ctl.confirm_delete_account().await,
                "no" | "n" => ctl.cancel_delete_account(),
                _ => ctl.set_error("Type yes or no"),
            }
            return Flow::Continue;
        }
        if ctl.favorites_open() && matches!(command, "close" | "exit" | "favorites") {
            ctl.toggle_favorites_modal();
            return Flow::Continue;
        }

        let handled = match ctl.screen() {
            Screen::Entry => match command {
                "login" | "1" => {
                    ctl.navigate(Screen::Login);
                    true
                }
                "signup" | "2" => {
                    ctl.navigate(Screen::SignUp);
                    true
                }
                _ => false,
            },
            screen @ (Screen::Login | Screen::SignUp) => match command {
                "username" | "email" => {
                    ctl.set_username(arg);
                    true
                }
                "password" => {
                    ctl.set_password(arg);
                    true
                }
                "submit" => {
                    if screen == Screen::Login {
                        ctl.login().await;
                    } else {
                        ctl.sign_up().await;
                    }
                    true
                }
                "back" => {
                    ctl.navigate(Screen::Entry);
                    true
                }
                _ => false,
            },
            Screen::Categories => match command {
                "update" => {
                    ctl.navigate(Screen::UpdatePassword);
                    true
                }
                "delete" => {
                    ctl.request_delete_account();
                    true
                }
                "favorites" => {
                    ctl.toggle_favorites_modal();
                    true
                }
                "logout" => {
                    ctl.logout();
                    true
                }
                n => match pick(n, jokes::categories()) {
                    Some(category) => {
                        ctl.navigate(Screen::CategoryJokes(category.id));
                        true
                    }
                    None => false,
                },
            },
            Screen::CategoryJokes(id) => match command {
                "back" => {
                    ctl.navigate(Screen::Categories);
                    true
                }
                "favorites" => {
                    ctl.toggle_favorites_modal();
                    true
                }
                n => match pick(n, jokes::get(id).jokes) {
                    Some(joke) => {
                        ctl.toggle_favorite(joke);
                        true
                    }
                    None => false,
                },
            },
            Screen::UpdatePassword => match command {
                "password" => {
                    ctl.set_password(arg);
                    true
                }
                "submit" => {
                    ctl.update_password().await;
                    true
                }
                "cancel" | "back" => {
                    ctl.navigate(Screen::Categories);
                    true
                }
                _ => false,
            },
        };

        if !handled {
            ctl.set_error(format!("Unknown command: {command}"));
        }
        Flow::Continue
    }
}

/// 1-based menu pick.
fn pick<T>(input: &str, items: &'static [T]) -> Option<&'static T> {
    let n: usize = input.parse().ok()?;
    n.checked_sub(1).and_then(|i| items.get(i))
}

/// Renders, reads a line, applies it; until `quit` or end of input.
pub async fn run<R, W>(shell: &mut Shell, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    loop {
        writer.write_all(shell.render().as_bytes()).await?;
        writer.write_all(b"> ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if shell.handle_line(&line).await == Flow::Quit {
            break;
        }
    }
    writer.write_all(b"\nBye!\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, SqliteCredentialStore};
    use crate::config::AppConfig;
    use crate::db::connect_in_memory;
    use std::sync::Arc;

    async fn shell() -> Shell {
        let store = Arc::new(SqliteCredentialStore::new(connect_in_memory().await));
        store.initialize().await.expect("initialize");
        Shell::new(Controller::new(store, &AppConfig::default()))
    }

    async fn feed(shell: &mut Shell, lines: &[&str]) {
        for line in lines {
            assert_eq!(shell.handle_line(line).await, Flow::Continue, "line {line:?}");
        }
    }

    #[tokio::test]
    async fn sign_up_then_log_in() {
        let mut sh = shell().await;
        feed(
            &mut sh,
            &["signup", "username alice", "password pw1", "submit"],
        )
        .await;
        assert_eq!(sh.controller().screen(), Screen::Entry);

        feed(&mut sh, &["login", "username alice", "password pw1", "submit"]).await;
        assert_eq!(sh.controller().screen(), Screen::Categories);
        assert!(sh.render().contains("Welcome, alice!"));
    }

    #[tokio::test]
    async fn favoriting_from_a_category() {
        let mut sh = shell().await;
        feed(
            &mut sh,
            &["signup", "username bob", "password pw", "submit"],
        )
        .await;
        feed(&mut sh, &["login", "username bob", "password pw", "submit", "2", "3", "3"]).await;

        let dad = &jokes::categories()[1];
        assert_eq!(sh.controller().screen(), Screen::CategoryJokes(dad.id));
        assert_eq!(sh.controller().list_favorites(), [dad.jokes[2]]);
        assert!(sh.render().contains(&format!("{} {}", dad.jokes[2], HEART_FULL)));

        feed(&mut sh, &["favorites"]).await;
        assert!(sh.render().contains("Your Favorite Jokes"));
        feed(&mut sh, &["close", "back"]).await;
        assert_eq!(sh.controller().screen(), Screen::Categories);
    }

    #[tokio::test]
    async fn delete_flow_asks_first() {
        let mut sh = shell().await;
        feed(&mut sh, &["signup", "username carol", "password pw", "submit"]).await;
        feed(&mut sh, &["login", "username carol", "password pw", "submit", "delete"]).await;
        assert!(sh.render().contains("(yes/no)"));

        feed(&mut sh, &["maybe"]).await;
        assert_eq!(sh.controller().error(), Some("Type yes or no"));

        feed(&mut sh, &["yes"]).await;
        assert!(sh.controller().session().is_none());
        assert_eq!(sh.controller().screen(), Screen::Entry);
    }

    #[tokio::test]
    async fn password_is_masked_and_unknown_commands_report() {
        let mut sh = shell().await;
        feed(&mut sh, &["login", "password secret"]).await;
        let text = sh.render();
        assert!(text.contains("Password: ******"));
        assert!(!text.contains("secret"));

        feed(&mut sh, &["dance"]).await;
        assert_eq!(sh.controller().error(), Some("Unknown command: dance"));
        assert!(sh.render().contains("! Unknown command: dance"));
    }

    #[test]
    fn out_of_range_picks_are_rejected() {
        assert!(pick("0", jokes::categories()).is_none());
        assert!(pick("3", jokes::categories()).is_none());
        assert!(pick("x", jokes::categories()).is_none());
        assert_eq!(pick("1", jokes::categories()).map(|c| c.name), Some("One Liners Jokes"));
    }

    #[tokio::test]
    async fn run_stops_on_quit() {
        let mut sh = shell().await;
        let input: &[u8] = b"signup\nusername dave\npassword pw\nsubmit\nquit\nlogin\n";
        let mut output = Vec::new();

        run(&mut sh, input, &mut output).await.expect("run");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("== Sign Up =="));
        assert!(text.ends_with("Bye!\n"));
        assert_eq!(sh.controller().screen(), Screen::Entry);
    }

    #[tokio::test]
    async fn padded_password_is_stored_as_typed() {
        let store = Arc::new(SqliteCredentialStore::new(connect_in_memory().await));
        store.initialize().await.expect("initialize");
        let mut sh = Shell::new(Controller::new(store.clone(), &AppConfig::default()));

        feed(&mut sh, &["signup", "username alice", "password  pw ", "submit"]).await;
        assert_eq!(sh.controller().screen(), Screen::Entry);

        assert!(store.authenticate("alice", " pw ").await.is_ok());
        assert!(store.authenticate("alice", "pw").await.is_err());

        feed(&mut sh, &["login", "username alice", "password pw", "submit"]).await;
        assert!(sh.controller().session().is_none());

        feed(&mut sh, &["password  pw \r\n", "submit"]).await;
        assert_eq!(sh.controller().screen(), Screen::Categories);
    }
}
