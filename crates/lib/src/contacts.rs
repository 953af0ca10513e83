//! # Contact Resolver
//!
//! Answers "who do I talk to" questions with the details of the founder or the
//! general manager.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub role: &'static str,
}

pub const FOUNDER: ContactRecord = ContactRecord {
    name: "Divya Khandal",
    email: "divz333@gmail.com",
    phone: "9166167005",
    role: "Founder",
};

pub const GENERAL_MANAGER: ContactRecord = ContactRecord {
    name: "Mr. Maan Singh",
    email: "mansinghr4@gmail.com",
    phone: "9829854896",
    role: "General Manager",
};

/// Which party a contact question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactParty {
    Founder,
    GeneralManager,
    /// A generic request for contact details; both people are listed.
    Everyone,
}

impl ContactParty {
    /// All parties in the order they are checked.
    pub const PRIORITY: [ContactParty; 3] = [
        ContactParty::Founder,
        ContactParty::GeneralManager,
        ContactParty::Everyone,
    ];

    /// The lowercase phrases that identify this party.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ContactParty::Founder => &["founder", "divya"],
            ContactParty::GeneralManager => &["general manager", "maan singh", "gm"],
            ContactParty::Everyone => &["contact"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContactParty::Founder => "founder_contact",
            ContactParty::GeneralManager => "general_manager_contact",
            ContactParty::Everyone => "general_contact",
        }
    }

    /// Renders the contact text for this party.
    pub fn reply(self) -> String {
        match self {
            ContactParty::Founder => format!(
                "👩‍💼 Founder: {}\n📧 {}\n📞 {}",
                FOUNDER.name, FOUNDER.email, FOUNDER.phone
            ),
            ContactParty::GeneralManager => format!(
                "👨‍💼 GM: {}\n📧 {}\n📞 {}",
                GENERAL_MANAGER.name, GENERAL_MANAGER.email, GENERAL_MANAGER.phone
            ),
            ContactParty::Everyone => format!(
                "📞 Founder: {} | GM: {}\n📧 Emails: {}, {}",
                FOUNDER.phone, GENERAL_MANAGER.phone, FOUNDER.email, GENERAL_MANAGER.email
            ),
        }
    }
}

/// Returns the party a message asks about, founder first, then GM, then anyone.
pub fn detect_contact(message: &str) -> Option<ContactParty> {
    let lowercased = message.to_lowercase();
    ContactParty::PRIORITY.into_iter().find(|party| {
        party
            .keywords()
            .iter()
            .any(|keyword| lowercased.contains(keyword))
    })
}

/// Returns formatted contact details if the message asks for them.
pub fn resolve_contact(message: &str) -> Option<String> {
    detect_contact(message).map(ContactParty::reply)
}
