use crate::money::Rupees;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    VisitWebsite,
    YoutubeSubscribe,
    FacebookLike,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [
        TaskType::VisitWebsite,
        TaskType::YoutubeSubscribe,
        TaskType::FacebookLike,
    ];
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskType::VisitWebsite => "Visit Website",
            TaskType::YoutubeSubscribe => "YouTube Subscribe",
            TaskType::FacebookLike => "Facebook Like",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub task_type: TaskType,
    pub title: String,
    pub description: String,
    pub url: String,
    pub reward: Rupees,
}

/// What a user fills in to launch a campaign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDraft {
    pub task_type: TaskType,
    pub title: String,
    pub url: String,
    pub reward: Rupees,
}

/// A purchased campaign. `completions` and `views` are never advanced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedTask {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub reward: Rupees,
    pub quantity: u32,
    #[serde(default)]
    pub completions: u32,
    #[serde(default)]
    pub views: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub employment: String,
    pub salary: String,
    pub is_premium: bool,
}

pub fn available_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "task1".to_string(),
            task_type: TaskType::VisitWebsite,
            title: "Visit TechCrunch Homepage".to_string(),
            description: "Spend 30 seconds on the homepage.".to_string(),
            url: "https://techcrunch.com".to_string(),
            reward: Rupees::from_paisa(550),
        },
        Task {
            id: "task2".to_string(),
            task_type: TaskType::YoutubeSubscribe,
            title: "Subscribe to MKBHD".to_string(),
            description: "Subscribe to the YouTube channel Marques Brownlee.".to_string(),
            url: "https://youtube.com/mkbhd".to_string(),
            reward: Rupees::whole(10),
        },
        Task {
            id: "task3".to_string(),
            task_type: TaskType::FacebookLike,
            title: "Like our Facebook Page".to_string(),
            description: "Visit our page and hit the like button.".to_string(),
            url: "https://facebook.com".to_string(),
            reward: Rupees::from_paisa(325),
        },
    ]
}

pub fn job_board() -> Vec<Job> {
    vec![
        Job {
            id: "job1".to_string(),
            title: "Data Entry Clerk".to_string(),
            description: "Enter data from various sources into our database.".to_string(),
            employment: "Part-time".to_string(),
            salary: "15,000 Rs/month".to_string(),
            is_premium: false,
        },
        Job {
            id: "job2".to_string(),
            title: "Virtual Assistant".to_string(),
            description: "Provide administrative, technical, or creative assistance to clients remotely.".to_string(),
            employment: "Full-time".to_string(),
            salary: "30,000 Rs/month".to_string(),
            is_premium: true,
        },
        Job {
            id: "job3".to_string(),
            title: "Social Media Manager".to_string(),
            description: "Manage and grow our social media presence.".to_string(),
            employment: "Contract".to_string(),
            salary: "25,000 Rs/month".to_string(),
            is_premium: true,
        },
    ]
}
