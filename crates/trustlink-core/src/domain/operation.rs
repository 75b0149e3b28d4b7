use std::fmt;

/// Tag identifying which client call produced a request, a log line or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    ListIncidents,
    CreateIncident,
    GetIncident,
    UpdateIncident,
    DeleteIncident,
    SendEmergency,
    SendReport,
    FetchMessages,
    SendMessage,
    SendEmergencyChat,
    MarkMessageRead,
    CurrentUser,
    UpdateCurrentUser,
    ListUsers,
    GetUser,
    UpdateUser,
    DeleteUser,
    Health,
    ConnectChat,
}

impl Operation {
    /// Stable snake_case tag used as a structured logging field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Register => "register",
            Operation::ListIncidents => "list_incidents",
            Operation::CreateIncident => "create_incident",
            Operation::GetIncident => "get_incident",
            Operation::UpdateIncident => "update_incident",
            Operation::DeleteIncident => "delete_incident",
            Operation::SendEmergency => "send_emergency",
            Operation::SendReport => "send_report",
            Operation::FetchMessages => "fetch_messages",
            Operation::SendMessage => "send_message",
            Operation::SendEmergencyChat => "send_emergency_chat",
            Operation::MarkMessageRead => "mark_message_read",
            Operation::CurrentUser => "current_user",
            Operation::UpdateCurrentUser => "update_current_user",
            Operation::ListUsers => "list_users",
            Operation::GetUser => "get_user",
            Operation::UpdateUser => "update_user",
            Operation::DeleteUser => "delete_user",
            Operation::Health => "health",
            Operation::ConnectChat => "connect_chat",
        }
    }

    /// Human-readable label, used as the `<Operation>` in `"<Operation> failed: ..."`.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Login => "Login",
            Operation::Register => "Registration",
            Operation::ListIncidents => "Fetch incidents",
            Operation::CreateIncident => "Create incident",
            Operation::GetIncident => "Fetch incident",
            Operation::UpdateIncident => "Update incident",
            Operation::DeleteIncident => "Delete incident",
            Operation::SendEmergency => "Emergency",
            Operation::SendReport => "Report",
            Operation::FetchMessages => "Fetch messages",
            Operation::SendMessage => "Send message",
            Operation::SendEmergencyChat => "Emergency chat",
            Operation::MarkMessageRead => "Mark as read",
            Operation::CurrentUser => "Fetch profile",
            Operation::UpdateCurrentUser => "Update profile",
            Operation::ListUsers => "Fetch users",
            Operation::GetUser => "Fetch user",
            Operation::UpdateUser => "Update user",
            Operation::DeleteUser => "Delete user",
            Operation::Health => "Health check",
            Operation::ConnectChat => "Chat connection",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
