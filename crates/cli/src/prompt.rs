//! Terminal prompt shown while waiting for the browser login

use std::io::{self, Write};

use slack_status_core::OperatorPrompt;
use slack_status_domain::ListenerTls;
use tracing::warn;

/// Prints the authorization URL on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl OperatorPrompt for ConsolePrompt {
    fn present(&self, authorization_url: &str, tls: &ListenerTls) {
        let stdout = io::stdout();
        if let Err(err) = write_instructions(&mut stdout.lock(), authorization_url, tls) {
            warn!(error = %err, "prompt.write_failed");
        }
    }
}

pub(crate) fn write_instructions(
    out: &mut impl Write,
    authorization_url: &str,
    tls: &ListenerTls,
) -> io::Result<()> {
    writeln!(out, "To authenticate, go to the following URL:")?;
    if matches!(tls, ListenerTls::Tls(_)) {
        writeln!(
            out,
            "NOTE: after logging in your browser will warn about the certificate of the local \
             callback server. It is self-signed; accept it to finish the login."
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{authorization_url}")?;
    out.flush()
}
