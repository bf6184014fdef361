// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Case-insensitive substring filtering for list endpoints.
//!
//! List screens filter after the upstream fetch, the same way the dashboards
//! filtered client-side. An empty search term keeps the full list.

use crate::models::{Feedback, FitnessClass, MembershipPlan, User};

/// Longest accepted search term; anything longer is rejected up front.
pub const MAX_SEARCH_LEN: usize = 100;

/// An entity that exposes text fields for search.
pub trait Searchable {
    /// The fields the search box matches against.
    fn search_fields(&self) -> Vec<&str>;
}

/// True if `term` is empty or matches any field, case-insensitively.
pub fn matches<T: Searchable>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|f| f.to_lowercase().contains(&needle))
}

/// Filter a fetched list in place by the search term.
pub fn apply<T: Searchable>(items: Vec<T>, term: &str) -> Vec<T> {
    if term.is_empty() {
        return items;
    }
    items.into_iter().filter(|i| matches(i, term)).collect()
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email]
    }
}

impl Searchable for FitnessClass {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(d) = self.description.as_deref() {
            fields.push(d);
        }
        if let Some(l) = self.location.as_deref() {
            fields.push(l);
        }
        fields
    }
}

impl Searchable for MembershipPlan {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(d) = self.description.as_deref() {
            fields.push(d);
        }
        fields
    }
}

impl Searchable for Feedback {
    fn search_fields(&self) -> Vec<&str> {
        self.comment.as_deref().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(first: &str, last: &str, email: &str) -> User {
        User {
            id: 1,
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role: Role::Member,
            phone_number: None,
            address: None,
            profile_picture_url: None,
            join_date: None,
        }
    }

    #[test]
    fn test_empty_term_returns_full_list() {
        let users = vec![
            user("Ada", "Lovelace", "ada@example.com"),
            user("Grace", "Hopper", "grace@example.com"),
        ];
        let filtered = apply(users, "");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let users = vec![
            user("Ada", "Lovelace", "ada@example.com"),
            user("Grace", "Hopper", "grace@example.com"),
        ];
        let filtered = apply(users, "LOVE");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_name, "Ada");
    }

    #[test]
    fn test_matches_any_listed_field() {
        let u = user("Ada", "Lovelace", "ada@example.com");
        assert!(matches(&u, "example.com"));
        assert!(matches(&u, "ada"));
        assert!(!matches(&u, "hopper"));
    }

    #[test]
    fn test_class_search_skips_absent_optional_fields() {
        let class = FitnessClass {
            id: 1,
            title: "Morning Yoga".to_string(),
            description: None,
            instructor: 7,
            capacity: 20,
            price_cents: 1500,
            duration_minutes: 60,
            start_datetime: "2026-09-01T08:00:00Z".to_string(),
            end_datetime: "2026-09-01T09:00:00Z".to_string(),
            location: None,
            is_active: true,
        };
        assert!(matches(&class, "yoga"));
        assert!(!matches(&class, "studio"));
    }
}
