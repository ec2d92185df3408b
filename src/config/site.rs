//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub tagline: String,
    pub description: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Sections
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default = "default_social")]
    pub social: IndexMap<String, String>,
    #[serde(default = "default_services")]
    pub services: Vec<ServiceItem>,
    #[serde(default)]
    pub about: AboutConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "YourName.dev".to_string(),
            author: "Your Name".to_string(),
            tagline: "An ICT Professional passionate about building innovative solutions and exploring the latest in technology.".to_string(),
            description: "Portfolio, projects and writing of an ICT professional.".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            server: ServerConfig::default(),
            contact: ContactConfig::default(),
            content: ContentConfig::default(),
            blog: BlogConfig::default(),
            social: default_social(),
            services: default_services(),
            about: AboutConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        // An empty file is a valid, all-defaults configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Timezone used for "now" on rendered pages (footer year).
    /// Falls back to UTC when unset or unknown.
    pub fn tz(&self) -> chrono_tz::Tz {
        if self.timezone.is_empty() {
            return chrono_tz::UTC;
        }
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                chrono_tz::UTC
            }
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Path the contact page posts to
    pub endpoint: String,
    /// Artificial processing delay for each accepted submission
    pub delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/contact".to_string(),
            delay_ms: 1000,
        }
    }
}

/// Content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Include the catalog embedded in the binary
    pub builtin: bool,
    /// Syntax highlighting theme for code blocks in Markdown sources
    pub highlight_theme: String,
    pub line_numbers: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}

/// Blog list page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub ad_placeholder: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            ad_placeholder: true,
        }
    }
}

/// A "What I Do" card on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// About page content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub intro: Vec<String>,
    pub skills: Vec<Skill>,
    pub skills_note: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent (0..=100)
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub year: String,
}

impl Default for AboutConfig {
    fn default() -> Self {
        let skill = |name: &str, level: u8| Skill {
            name: name.to_string(),
            level,
        };
        Self {
            intro: vec![
                "Welcome to my personal corner of the internet! I'm an ICT professional with a passion for leveraging technology to solve real-world problems. My journey in the tech world has been driven by curiosity and a commitment to continuous learning, allowing me to adapt to diverse challenges and master new tools.".to_string(),
                "My expertise spans across frontend development, data analysis, UI/UX design, and information architecture. I believe in creating solutions that are not only technically sound but also intuitive, user-friendly, and visually appealing.".to_string(),
            ],
            skills: vec![
                skill("JavaScript", 90),
                skill("Python", 85),
                skill("SQL", 80),
                skill("React", 90),
                skill("Node.js", 75),
                skill("Tailwind CSS", 95),
                skill("Data Viz", 88),
                skill("Cloud (AWS)", 70),
            ],
            skills_note: "The chart above illustrates my proficiency across various technical skills. I continuously strive to expand my knowledge base and stay updated with the latest industry trends.".to_string(),
            experience: vec![
                Experience {
                    role: "Senior Frontend Developer".to_string(),
                    company: "Tech Innovations Inc.".to_string(),
                    period: "Jan 2022 - Present".to_string(),
                    highlights: vec![
                        "Led the development of responsive web applications using React, Next.js, and Tailwind CSS.".to_string(),
                        "Optimized application performance, reducing load times by 30% through code splitting and image optimization.".to_string(),
                        "Collaborated with UI/UX designers to translate wireframes and mockups into high-fidelity user interfaces.".to_string(),
                    ],
                },
                Experience {
                    role: "Data Analyst".to_string(),
                    company: "Global Analytics Corp.".to_string(),
                    period: "Jun 2019 - Dec 2021".to_string(),
                    highlights: vec![
                        "Performed in-depth data analysis to identify key trends and insights for business growth strategies.".to_string(),
                        "Developed interactive dashboards using Python (Pandas, Matplotlib) and Tableau for various departments.".to_string(),
                        "Assisted in designing and implementing ETL processes for data warehousing.".to_string(),
                    ],
                },
            ],
            education: vec![
                Education {
                    degree: "Master of Science in Information Technology".to_string(),
                    school: "University of Technology".to_string(),
                    year: "2018".to_string(),
                },
                Education {
                    degree: "Bachelor of Science in Computer Science".to_string(),
                    school: "National University".to_string(),
                    year: "2016".to_string(),
                },
            ],
        }
    }
}

fn default_social() -> IndexMap<String, String> {
    let mut social = IndexMap::new();
    social.insert("LinkedIn".to_string(), "#".to_string());
    social.insert("GitHub".to_string(), "#".to_string());
    social
}

fn default_services() -> Vec<ServiceItem> {
    let item = |icon: &str, title: &str, description: &str| ServiceItem {
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    };
    vec![
        item(
            "💻",
            "Frontend Development",
            "Crafting intuitive and responsive user interfaces with modern web technologies.",
        ),
        item(
            "📊",
            "Data Analysis",
            "Transforming complex data into actionable insights for strategic decision-making.",
        ),
        item(
            "💡",
            "Information Architecture",
            "Designing logical and user-friendly structures for complex information systems.",
        ),
    ]
}
