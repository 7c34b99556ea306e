//! User display formatting

use crate::models::User;

pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let mut output = format!("{:<8} {:<24} {:<6} {}\n", "ID", "Username", "Admin", "Created");
    output.push_str(&"-".repeat(58));
    output.push('\n');
    for user in users {
        output.push_str(&format!(
            "{:<8} {:<24} {:<6} {}\n",
            user.id.to_string(),
            super::truncate(&user.username, 24),
            if user.is_admin { "yes" } else { "" },
            user.created_at.format("%Y-%m-%d")
        ));
    }
    output
}
