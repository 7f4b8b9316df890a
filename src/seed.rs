use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{
    Board, CodeExample, ColumnId, Issue, IssueType, Priority, ReviewIssue, Severity, UNASSIGNED,
};

/// People who can own a ticket raised from a review.
pub const TEAM_MEMBERS: &[&str] = &["Alex Chen", "Maya Johnson", "Taylor Smith", "Jamie Park"];

fn sample(
    id: &str,
    title: &str,
    description: &str,
    priority: Priority,
    assignee: &str,
    due: Option<(i32, u32, u32)>,
    issue_type: IssueType,
    code_review_id: Option<&str>,
) -> Issue {
    Issue {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        priority,
        assignee: assignee.into(),
        due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        issue_type,
        code_review_id: code_review_id.map(str::to_owned),
    }
}

pub fn sample_issues() -> HashMap<String, Issue> {
    use IssueType::*;
    use Priority::*;

    let issues = vec![
        sample(
            "issue-1",
            "Refactor authentication module",
            "Improve code quality and test coverage",
            Medium,
            "Alex Chen",
            Some((2023, 10, 25)),
            Task,
            None,
        ),
        sample(
            "issue-2",
            "Fix CSS layout on mobile",
            "Menu overlaps content on small screens",
            High,
            "Maya Johnson",
            Some((2023, 10, 20)),
            Bug,
            Some("issue1"),
        ),
        sample(
            "issue-3",
            "Update dependencies",
            "Upgrade to latest versions of React and TypeScript",
            Low,
            UNASSIGNED,
            None,
            Maintenance,
            None,
        ),
        sample(
            "issue-4",
            "Add dark mode toggle",
            "Implement theme switching with system preference detection",
            Medium,
            "Taylor Smith",
            Some((2023, 10, 22)),
            Feature,
            None,
        ),
        sample(
            "issue-5",
            "Optimize image loading",
            "Implement lazy loading for better performance",
            Medium,
            "Jamie Park",
            Some((2023, 10, 28)),
            Task,
            None,
        ),
        sample(
            "issue-6",
            "Implement SSO login",
            "Add support for Google and GitHub login",
            High,
            "Alex Chen",
            Some((2023, 10, 18)),
            Feature,
            None,
        ),
        sample(
            "issue-7",
            "Refine search algorithm",
            "Improve relevance ranking in search results",
            Medium,
            "Maya Johnson",
            Some((2023, 10, 23)),
            Improvement,
            None,
        ),
        sample(
            "issue-8",
            "Fix account settings bug",
            "Profile changes not saving correctly",
            High,
            "Taylor Smith",
            Some((2023, 10, 15)),
            Bug,
            Some("issue4"),
        ),
        sample(
            "issue-9",
            "Add API documentation",
            "Create comprehensive API reference for developers",
            Medium,
            "Jamie Park",
            Some((2023, 10, 10)),
            Documentation,
            None,
        ),
        sample(
            "issue-10",
            "Update privacy policy",
            "Review and update for compliance with new regulations",
            High,
            "Legal Team",
            Some((2023, 10, 8)),
            Task,
            None,
        ),
    ];

    issues.into_iter().map(|i| (i.id.clone(), i)).collect()
}

pub fn sample_board() -> Board {
    let ids = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();

    Board::default()
        .with_column(ColumnId::Backlog, ids(&["issue-1", "issue-2", "issue-3"]))
        .with_column(ColumnId::Todo, ids(&["issue-4", "issue-5"]))
        .with_column(ColumnId::InProgress, ids(&["issue-6", "issue-7"]))
        .with_column(ColumnId::Review, ids(&["issue-8"]))
        .with_column(ColumnId::Done, ids(&["issue-9", "issue-10"]))
}

fn finding(
    id: &str,
    line: u32,
    severity: Severity,
    message: &str,
    suggestion: &str,
    code: Option<&str>,
) -> ReviewIssue {
    ReviewIssue {
        id: id.into(),
        line,
        severity,
        message: message.into(),
        suggestion: Some(suggestion.into()),
        code: code.map(str::to_owned),
        ticket_id: None,
    }
}

const USER_PROFILE_SRC: &str = r##"import React, { useState, useEffect } from 'react';

const UserProfile = ({ userId }) => {
  const [user, setUser] = useState(null);
  const [loading, setLoading] = useState(true);
  const [error, setError] = useState(null);

  useEffect(() => {
    const fetchUser = async () => {
      try {
        const response = await fetch(`https://api.example.com/users/${userId}`);
        const data = await response.json();
        setUser(data);
        setLoading(false);
      } catch (err) {
        setError('Failed to fetch user data');
        setLoading(false);
        console.log(err);
      }
    };

    fetchUser();
  }, []);

  if (loading) return <p>Loading...</p>;
  if (error) return <p>{error}</p>;

  return (
    <div className="user-profile">
      <h1>{user.name}</h1>
      <img src={user.avatar} alt={user.name} />
      <p>{user.bio}</p>
      <div class="stats">
        <span>{user.followers} followers</span>
        <span>{user.following} following</span>
      </div>
    </div>
  );
};

export default UserProfile;"##;

const AUTH_SERVICE_SRC: &str = r##"import axios from 'axios';

const API_URL = 'https://api.example.com';
let token = localStorage.getItem('auth_token');

export const login = async (username, password) => {
  try {
    const response = await axios.post(`${API_URL}/login`, {
      username,
      password
    });

    token = response.data.token;
    localStorage.setItem('auth_token', token);
    return response.data.user;
  } catch (error) {
    console.error('Login failed:', error);
    throw error;
  }
};

export const logout = () => {
  localStorage.removeItem('auth_token');
  token = null;
};

export const getUser = async () => {
  if (!token) return null;

  const response = await axios.get(`${API_URL}/user`, {
    headers: {
      Authorization: `Bearer ${token}`
    }
  });

  return response.data;
};"##;

/// Built-in review examples; the first one is the review page's fallback.
pub fn code_examples() -> Vec<CodeExample> {
    use Severity::*;

    vec![
        CodeExample {
            id: "example1",
            name: "React Component",
            language: "typescript",
            code: USER_PROFILE_SRC,
            issues: vec![
                finding(
                    "issue1",
                    13,
                    Warning,
                    "Missing dependency in useEffect",
                    "Add userId to the dependency array to re-fetch when userId changes",
                    None,
                ),
                finding(
                    "issue2",
                    15,
                    Error,
                    "Using console.log in production code",
                    "Remove console.log or replace with proper error logging",
                    None,
                ),
                finding(
                    "issue3",
                    22,
                    Warning,
                    "Missing null check before accessing user properties",
                    "Add a check to ensure user is not null before accessing its properties",
                    None,
                ),
                finding(
                    "issue4",
                    24,
                    Error,
                    "Using class instead of className in JSX",
                    "Replace class with className for React JSX",
                    Some("<div className=\"stats\">"),
                ),
            ],
        },
        CodeExample {
            id: "example2",
            name: "Authentication Service",
            language: "typescript",
            code: AUTH_SERVICE_SRC,
            issues: vec![
                finding(
                    "issue5",
                    4,
                    Error,
                    "Storing token in global variable",
                    "Use a more secure method for token storage",
                    None,
                ),
                finding(
                    "issue6",
                    28,
                    Error,
                    "Missing error handling in async function",
                    "Add try/catch block to handle potential errors",
                    None,
                ),
                finding(
                    "issue7",
                    3,
                    Info,
                    "API URL hardcoded",
                    "Consider using environment variables for API URLs",
                    None,
                ),
            ],
        },
    ]
}

pub fn find_example(id: &str) -> Option<CodeExample> {
    code_examples().into_iter().find(|e| e.id == id)
}
