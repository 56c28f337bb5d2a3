use std::io::{self, BufRead, Write};

use canopy_profile::{
    configuration::get_configuration,
    digest::HmacSha256,
    domain::FormField,
    telemetry::init_tracing,
    workflow::{PasswordChangeWorkflow, DEBOUNCE_QUIET_PERIOD},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().expect("Failed to read configuration.");
    let _guard = init_tracing(&configuration.logger);

    let client = configuration.identity.client();
    let sessions = configuration.session.store();
    let workflow = PasswordChangeWorkflow::new(client, sessions, HmacSha256);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut prompt = |label: &str, field: FormField| -> anyhow::Result<()> {
        print!("{}: ", label);
        io::stdout().flush()?;
        let value = lines
            .next()
            .transpose()?
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input"))?;
        workflow.update_field(field, value);
        Ok(())
    };
    prompt("Current password", FormField::CurrentPassword)?;
    prompt("New password", FormField::NewPassword)?;
    prompt("Confirm new password", FormField::NewPasswordCheck)?;

    // Give the debounce a chance to settle before checking the gate.
    tokio::time::sleep(DEBOUNCE_QUIET_PERIOD * 2).await;
    if let Some(error) = workflow.validation_error() {
        eprintln!("{}", error);
        std::process::exit(1);
    }

    match workflow.submit().await {
        Ok(()) => {
            println!("Password updated.");
            Ok(())
        }
        Err(e) => {
            eprintln!("Password update failed: {}", e);
            std::process::exit(1);
        }
    }
}
