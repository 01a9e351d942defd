//! Row and pager view models for the user table.

use ustr::Ustr;

use crate::users::action_compute::UserActionKind;
use crate::users::model::User;

pub const COLUMNS: [&str; 4] = ["Email", "Role", "Status", "Actions"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub email: Ustr,
    pub role: &'static str,
    pub status: &'static str,
    pub role_action: UserActionKind,
    pub access_action: UserActionKind,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            email: Ustr::from(&user.email),
            role: user.role.label(),
            status: user.status.label(),
            role_action: UserActionKind::for_role(user.role),
            access_action: UserActionKind::for_status(user.status),
        }
    }
}

/// One row per user, in input order.
pub fn user_rows(users: &[User]) -> Vec<UserRow> {
    users.iter().map(UserRow::from).collect()
}

/// Current page and page count. Pages are zero-based, labels one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub current: u32,
    pub total: u32,
}

impl PageDescriptor {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.min(total - 1),
            total,
        }
    }

    pub fn show_selector(&self) -> bool {
        self.total > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current.saturating_add(1) < self.total
    }

    pub fn label(page: u32) -> String {
        page.saturating_add(1).to_string()
    }

    /// Pages to render as buttons: all of them up to seven, otherwise the
    /// first, last and a window around the current page.
    pub fn visible_pages(&self) -> Vec<u32> {
        const MAX_BUTTONS: u32 = 7;

        if self.total <= MAX_BUTTONS {
            return (0..self.total).collect();
        }

        let last = self.total - 1;
        let start = self.current.saturating_sub(2).max(1);
        let end = self.current.saturating_add(2).min(last - 1);

        let mut pages = vec![0];
        pages.extend(start..=end);
        pages.push(last);
        pages
    }
}
