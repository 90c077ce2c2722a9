use crate::filter::{FilterOption, RosterCatalog};
use crate::gateway::{ApiError, MessagesGateway};
use crate::message::Message;
use crate::session::{Role, Session};

/// Everything the inbox page needs after a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxData {
    /// Newest first.
    pub messages: Vec<Message>,
    pub catalog: RosterCatalog,
}

/// Run the role-dependent fetch sequence for one mount of the page.
///
/// The message fetch always comes first; the roster lookups that feed
/// the filter checklists depend on the role. The first failure aborts
/// whatever remains, so callers surface exactly one notification per
/// failed load. The teacher branch is strictly ordered because the
/// student batch lookup needs the class ids from the preceding call.
pub async fn load_inbox<G: MessagesGateway>(
    gateway: &G,
    session: &Session,
) -> Result<InboxData, ApiError> {
    let mut messages = gateway.inbox(&session.id).await?;
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let catalog = match session.role {
        // Admins get the unfiltered list, so no roster is fetched.
        Role::Admin => RosterCatalog::default(),
        Role::Teacher => {
            let classes = gateway.classes_for_teacher(&session.id).await?;
            let class_ids: Vec<String> = classes.iter().map(|class| class.id.clone()).collect();
            let students = gateway.students_in_classes(&class_ids).await?;
            RosterCatalog {
                users: Vec::new(),
                classes: classes.iter().map(FilterOption::from).collect(),
                students: students.iter().map(FilterOption::from).collect(),
            }
        }
        Role::Parent => {
            let admins = gateway.admin_users().await?;
            RosterCatalog {
                users: admins.iter().map(FilterOption::from).collect(),
                classes: Vec::new(),
                students: Vec::new(),
            }
        }
        Role::Student => {
            let student = gateway
                .student_by_email(&session.email)
                .await?
                .ok_or_else(|| ApiError::MissingRecord(format!("student for {}", session.email)))?;
            let class_id = student
                .class
                .clone()
                .ok_or_else(|| ApiError::MissingRecord(format!("class for student {}", student.id)))?;
            let class = gateway.class(&class_id).await?;
            RosterCatalog {
                users: Vec::new(),
                classes: vec![FilterOption::from(&class)],
                students: vec![FilterOption::from(&student)],
            }
        }
    };

    Ok(InboxData { messages, catalog })
}
