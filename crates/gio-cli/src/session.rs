//! Interactive host simulation.
//!
//! A [`Session`] plays the host OS around one [`Container`]: stdin
//! commands become lifecycle callbacks and permission answers, and the
//! resulting protocol lines are returned for printing.

use crate::command::{Command, Verdict};
use crate::console::{ConsoleNotifier, ConsoleSurface, Transcript};
use gio_auth::{GrantResult, PermissionRequest, PermissionResponse};
use gio_runtime::{
    BackAction, BridgeConfig, Container, ForwardError, LifecycleForwarder, PermissionCoordinator,
    SimulatedHost,
};
use gio_surface::Configuration;
use gio_types::RequestId;

type ConsoleContainer = Container<SimulatedHost, ConsoleSurface, ConsoleNotifier>;

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One simulated activity and its host.
pub struct Session {
    container: ConsoleContainer,
    host: SimulatedHost,
    transcript: Transcript,
    configuration: Configuration,
}

impl Session {
    pub fn new(config: &BridgeConfig, host: SimulatedHost, consume_back: bool) -> Self {
        let transcript = Transcript::default();
        let coordinator = PermissionCoordinator::with_table(
            host.clone(),
            ConsoleNotifier::new(transcript.clone()),
            config.permissions.rules.clone(),
        );
        let container = Container::from_parts(
            coordinator,
            LifecycleForwarder::new(),
            ConsoleSurface::new(transcript.clone(), consume_back),
        )
        .with_requested(config.permissions.requested());

        Self {
            container,
            host,
            transcript,
            configuration: Configuration::default(),
        }
    }

    /// Parses and runs one input line.
    pub fn handle_line(&mut self, line: &str) -> (Flow, Vec<String>) {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => (Flow::Continue, Vec::new()),
            Err(err) => (Flow::Continue, vec![format!("error: {err:#}")]),
        }
    }

    /// Runs one command and returns its output lines.
    pub fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        tracing::debug!(?command, "executing");
        let flow = match self.run(command) {
            Ok(flow) => flow,
            Err(err) => {
                self.transcript.push(format!("error: {err}"));
                Flow::Continue
            }
        };
        (flow, self.transcript.drain())
    }

    fn run(&mut self, command: Command) -> Result<Flow, ForwardError> {
        match command {
            Command::Create => {
                let issued = self.container.on_create()?;
                // Requests go out before the surface exists.
                let surface_lines = self.transcript.drain();
                for request in &issued {
                    self.push_request("request", request);
                }
                for line in surface_lines {
                    self.transcript.push(line);
                }
            }
            Command::Start => self.container.on_start()?,
            Command::Stop => self.container.on_stop()?,
            Command::Destroy => {
                for request in self.container.on_destroy()? {
                    self.push_request("abandoned", &request);
                }
            }
            Command::Config(changes) => {
                let next = changes
                    .iter()
                    .fold(self.configuration.clone(), |config, change| {
                        change.apply(config)
                    });
                self.container.on_configuration_changed(next.clone())?;
                self.configuration = next;
            }
            Command::LowMemory => {
                let hooks = self.container.on_low_memory();
                self.transcript.push(format!("low-memory: {hooks} hooks"));
            }
            Command::Back => {
                let action = match self.container.on_back_pressed()? {
                    BackAction::Consumed => "consumed",
                    BackAction::Finish => "finish",
                };
                self.transcript.push(format!("back: {action}"));
            }
            Command::Respond { id, verdict } => {
                let request_id = RequestId::new(id);
                let response = match verdict {
                    Verdict::Grant => self.answer(request_id, true),
                    Verdict::Deny => self.answer(request_id, false),
                    Verdict::Empty => self.host.cancel(request_id),
                };
                self.deliver(response);
            }
            Command::RespondAll { granted } => {
                for response in self.host.answer_all(granted) {
                    self.deliver(response);
                }
            }
            Command::Pending => {
                let pending: Vec<PermissionRequest> = self
                    .container
                    .coordinator()
                    .pending()
                    .into_iter()
                    .cloned()
                    .collect();
                if pending.is_empty() {
                    self.transcript.push("pending: none");
                }
                for request in &pending {
                    self.push_request("pending", request);
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Host answer for an issued prompt, or a bare single-result
    /// response for an id the host never issued.
    fn answer(&self, request_id: RequestId, granted: bool) -> PermissionResponse {
        self.host.answer(request_id, granted).unwrap_or_else(|| {
            PermissionResponse::new(request_id, Vec::new(), vec![GrantResult::from(granted)])
        })
    }

    fn deliver(&mut self, response: PermissionResponse) {
        let request_id = response.request_id;
        let outcome = self.container.on_request_permissions_result(
            response.request_id,
            response.capabilities,
            response.results,
        );
        if outcome.is_none() {
            self.transcript.push(format!("ignored: {}", request_id.get()));
        }
    }

    fn push_request(&self, label: &str, request: &PermissionRequest) {
        self.transcript.push(format!(
            "{label} {} {}",
            request.request_id.get(),
            request.capability
        ));
    }
}
