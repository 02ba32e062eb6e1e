//! Built-in portfolio content.

use super::{
    Blog, Certification, Contact, Education, Footer, Hero, Link, PortfolioContent, Project, Skill,
    Stat,
};

fn skill(name: &str, icon: &str) -> Skill {
    Skill {
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn link(label: &str, url: &str) -> Link {
    Link {
        label: label.to_string(),
        url: url.to_string(),
    }
}

fn project(title: &str, description: &str, tech: &[&str], github: &str, demo: &str) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        tech: tech.iter().map(|t| t.to_string()).collect(),
        github: github.to_string(),
        demo: demo.to_string(),
    }
}

pub fn portfolio() -> PortfolioContent {
    PortfolioContent {
        hero: Hero {
            name: "Manoj Mannam".to_string(),
            tagline: "Result-Oriented Student | AIML Enthusiast".to_string(),
            bio: "Hello! I'm Manoj Mannam, a passionate and results-oriented student with a deep \
                  interest in software engineering and Artificial Intelligence. I'm currently \
                  pursuing my B.Tech in Computer Science and have a solid foundation in front-end \
                  and back-end technologies. My goal is to leverage my skills to create impactful \
                  solutions and contribute to cutting-edge projects."
                .to_string(),
            resume_url: "#".to_string(),
        },
        education: vec![
            Education {
                period: "2022-Present".to_string(),
                institution: "CMR College of Engineering and Technology".to_string(),
                degree: "B.Tech in Computer Science".to_string(),
            },
            Education {
                period: "2018-2020".to_string(),
                institution: "Jawahar Navodaya Vidyalaya".to_string(),
                degree: "Science Stream".to_string(),
            },
        ],
        skills: vec![
            skill("C", "🔠"),
            skill("C++", "💻"),
            skill("Java", "☕"),
            skill("JavaScript", "📜"),
            skill("TypeScript", "🔷"),
            skill("SQL", "🗄️"),
            skill("Supabase", "🗂️"),
            skill("LangChain", "🔗"),
            skill("Xenova Transformers", "🤖"),
        ],
        tools: vec![
            skill("Git & GitHub", "🌐"),
            skill("Netlify (CI/CD)", "🚀"),
            skill("VS Code", "👨‍💻"),
            skill("Postman", "📬"),
            skill("Figma", "🎨"),
        ],
        projects: vec![
            project(
                "PDFMarket – Digital PDF Selling Platform",
                "A full-stack platform for selling PDFs with secure authentication, cart \
                 functionality, and seamless payment integration.",
                &["JavaScript", "TypeScript", "Supabase (SQL)", "Razorpay API", "Netlify (CI/CD)"],
                "https://github.com/Manoj-APJ/pdfstore",
                "https://manojtalent.netlify.app/",
            ),
            project(
                "AI-Powered PDF Organizer",
                "An AI-integrated file management system that allows users to upload, tag, \
                 categorize, and chat with PDFs using NLP models.",
                &["TypeScript", "JavaScript", "Supabase (SQL)", "LangChain", "Xenova Transformers"],
                "#",
                "#",
            ),
            project(
                "Binary Tree Visualization",
                "An interactive tool built with p5.js to visualize binary tree operations with \
                 dynamic animations, real-time searching, panning, and zooming.",
                &["JavaScript", "HTML", "CSS", "p5.js"],
                "#",
                "#",
            ),
            project(
                "Real-Time Object Detector",
                "An AI-powered object detection system using TensorFlow to classify and localize \
                 objects in real-time from live video streams.",
                &["Python", "TensorFlow", "OpenCV", "Flask"],
                "#",
                "#",
            ),
        ],
        profiles: vec![
            link("LeetCode", "https://leetcode.com/u/manojmannamapj9/"),
            link("GitHub", "https://github.com/Manoj-APJ/"),
            link("Codeforces", "#"),
        ],
        stats: vec![
            Stat {
                label: "Problems Solved".to_string(),
                value: 500,
                icon: "✅".to_string(),
            },
            Stat {
                label: "Competitive Rating".to_string(),
                value: 1754,
                icon: "⭐".to_string(),
            },
        ],
        certifications: vec![Certification {
            title: "Fundamentals of Python".to_string(),
            issuer: "Infosys Springboard".to_string(),
            date: "2025".to_string(),
            url: "#".to_string(),
        }],
        blogs: vec![
            Blog {
                title: "Getting Started with React Hooks".to_string(),
                snippet: "A beginner's guide to using useState and useEffect...".to_string(),
                date: "Oct 2023".to_string(),
                url: "#".to_string(),
            },
            Blog {
                title: "Understanding Backpropagation in Neural Networks".to_string(),
                snippet: "A deep dive into the core algorithm of deep learning...".to_string(),
                date: "Sep 2023".to_string(),
                url: "#".to_string(),
            },
        ],
        contact: Contact {
            email: "manojmannamapj9@gmail.com".to_string(),
            heading: "Get in Touch".to_string(),
            message: "Feel free to reach out to me via email.".to_string(),
        },
        footer: Footer {
            credit: "Made with ❤️ by Manoj Mannam".to_string(),
            links: vec![
                link("GitHub", "https://github.com/manojmannam"),
                link("LinkedIn", "https://www.linkedin.com/in/manojmannam"),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content_is_valid() {
        let content = portfolio();
        assert!(content.validate().is_ok());
        assert_eq!(content.skills.len(), 9);
        assert_eq!(content.tools.len(), 5);
        assert_eq!(content.projects.len(), 4);
    }

    #[test]
    fn test_builtin_stats() {
        let values: Vec<u64> = portfolio().stats.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![500, 1754]);
    }
}
