//! Transactional email composition.
//!
//! Bodies are rendered with `minijinja` from fixed templates; the wording
//! matches the notification copy used across the workspace surfaces.

use minijinja::Environment;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::CoreConfig;
use crate::email::message::{Mailbox, OutboundEmail};

const INVITATION_SUBJECT_TEMPLATE: &str =
    "You're invited to join the {{ workspace_name }} workspace!";

const INVITATION_BODY_TEMPLATE: &str = r"<p>Hello,</p>
<p><strong>{{ inviter_name }}</strong> has invited you to join the {{ workspace_name }} workspace on Task Management System.</p>
<p>Please click the link below to accept your invitation and create your account:</p>
<p><a href={{ signup_url }}>Accept Invitation</a></p>
<p>Your role will be: <strong>{{ role }}</strong></p>
<p>This invitation link is unique to you and can only be used once.</p>
<p>If you did not expect this invitation, you can safely ignore this email.</p>";

const ASSIGNMENT_SUBJECT_TEMPLATE: &str = "New Task Assigned: {{ task_title }}";

const ASSIGNMENT_BODY_TEMPLATE: &str = r"<p>Hello {{ assignee_name }},</p>
<p>You have been assigned a new task by <strong>{{ assigner_name }}</strong>.</p>
<p><strong>Task:</strong> {{ task_title }}</p>
<p>View task: <a href={{ task_url }}>Click here</a></p>";

/// Composes the invitation email carrying a signup link.
///
/// # Errors
///
/// Returns [`EmailRenderError`] when template rendering fails.
pub fn invitation_email(
    config: &CoreConfig,
    recipient_email: &str,
    inviter_name: &str,
    role: &str,
    signup_url: &str,
) -> Result<OutboundEmail, EmailRenderError> {
    let mut context = Map::new();
    context.insert(
        "workspace_name".to_owned(),
        Value::String(config.workspace_name().to_owned()),
    );
    context.insert(
        "inviter_name".to_owned(),
        Value::String(inviter_name.to_owned()),
    );
    context.insert("role".to_owned(), Value::String(role.to_owned()));
    context.insert(
        "signup_url".to_owned(),
        Value::String(signup_url.to_owned()),
    );

    Ok(OutboundEmail {
        sender: sender_mailbox(config),
        to: Mailbox::bare(recipient_email),
        subject: render("invitation-subject", INVITATION_SUBJECT_TEMPLATE, &context)?,
        html_body: render("invitation-body", INVITATION_BODY_TEMPLATE, &context)?,
        tags: vec!["invitation".to_owned()],
    })
}

/// Composes the task-assignment email pointing at the task page.
///
/// # Errors
///
/// Returns [`EmailRenderError`] when template rendering fails.
pub fn task_assignment_email(
    config: &CoreConfig,
    assignee: &Mailbox,
    assigner_name: &str,
    task_title: &str,
    task_url: &str,
) -> Result<OutboundEmail, EmailRenderError> {
    let assignee_name = assignee.name.clone().unwrap_or_else(|| "User".to_owned());
    let mut context = Map::new();
    context.insert("assignee_name".to_owned(), Value::String(assignee_name));
    context.insert(
        "assigner_name".to_owned(),
        Value::String(assigner_name.to_owned()),
    );
    context.insert(
        "task_title".to_owned(),
        Value::String(task_title.to_owned()),
    );
    context.insert("task_url".to_owned(), Value::String(task_url.to_owned()));

    Ok(OutboundEmail {
        sender: sender_mailbox(config),
        to: assignee.clone(),
        subject: render("assignment-subject", ASSIGNMENT_SUBJECT_TEMPLATE, &context)?,
        html_body: render("assignment-body", ASSIGNMENT_BODY_TEMPLATE, &context)?,
        tags: vec!["task-assignment".to_owned()],
    })
}

fn sender_mailbox(config: &CoreConfig) -> Mailbox {
    Mailbox::new(config.sender_email(), config.sender_name())
}

fn render(
    template_name: &str,
    template: &str,
    context: &Map<String, Value>,
) -> Result<String, EmailRenderError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| EmailRenderError {
            template: template_name.to_owned(),
            reason: error.to_string(),
        })
}

/// Error raised when an email template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render email template '{template}': {reason}")]
pub struct EmailRenderError {
    /// Template that failed.
    pub template: String,
    /// Renderer-reported reason.
    pub reason: String,
}
