//! Section builders.
//!
//! Each builder appends one part of the page under the current parent of
//! the element tree. Sections alternate light and dark tones in build
//! order.

use crate::content::{PortfolioContent, Skill};
use crate::engine::{BoxStyle, DynamicText, Edges, ElementTree, HitTarget, ScrollFade, TextStyle};
use crate::format::format_thousands;
use crate::layout::string_width;
use crate::state::chat;
use crate::state::reveal::RevealMotion;
use crate::theme::{Theme, Tone};
use crate::types::{AlignItems, BlockKey, BorderStyle, Dimension, JustifyContent};

use super::{stat_key, Timings, ViewState};

/// Cells reserved for the chat launcher face.
pub const CHAT_LAUNCHER_WIDTH: u16 = 9;

const CHAT_PANEL_WIDTH: u16 = 36;
const BIO_MAX_WIDTH: u16 = 72;
const CONTACT_MAX_WIDTH: u16 = 60;
const COPY_LABEL_WIDTH: u16 = 10;

/// Item reveal thresholds and staggers.
const SKILL_THRESHOLD: f32 = 0.5;
const SKILL_STAGGER_MS: u64 = 100;
const PROJECT_THRESHOLD: f32 = 0.2;
const CARD_STAGGER_MS: u64 = 200;

pub(super) struct PageBuilder<'a> {
    tree: ElementTree,
    content: &'a PortfolioContent,
    theme: &'a Theme,
    timings: Timings,
    state: ViewState,
    sections: usize,
}

impl<'a> PageBuilder<'a> {
    pub fn new(content: &'a PortfolioContent, theme: &'a Theme, timings: Timings, state: ViewState) -> Self {
        Self {
            tree: ElementTree::new(),
            content,
            theme,
            timings,
            state,
            sections: 0,
        }
    }

    pub fn build(&mut self) {
        let t = self.theme;
        self.tree.open(BoxStyle {
            bg: Some(t.dark_bg),
            fg: Some(t.dark_text),
            ..BoxStyle::column()
        });
        self.hero();
        self.skills();
        self.projects();
        self.certifications();
        self.profiles();
        self.blogs();
        self.contact();
        self.footer();
        self.tree.close();

        self.header();
        self.chat();
    }

    pub fn finish(self) -> ElementTree {
        self.tree
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Open a titled section and register its reveal and nav anchor.
    ///
    /// Returns the section tone. Pair with `self.tree.close()`.
    fn open_section(&mut self, id: &str, title: &str, nav: &str) -> Tone {
        let t = self.theme;
        let tone = Tone::alternating(self.sections);
        self.sections += 1;

        let section = self.tree.open(BoxStyle {
            bg: Some(t.bg(tone)),
            fg: Some(t.text(tone)),
            padding: Edges::symmetric(2, 4),
            gap: 1,
            ..BoxStyle::column()
        });
        self.tree
            .reveal(section, BlockKey::new(format!("section/{id}")), self.timings.section());
        self.tree.anchor(section, id, nav);
        self.tree
            .text(title, TextStyle::fg(t.heading(tone)).bold().underline().centered());
        tone
    }

    /// Open a bordered card on a `tone` section. Pair with `self.tree.close()`.
    fn open_card(&mut self, tone: Tone) -> usize {
        let t = self.theme;
        self.tree.open(BoxStyle {
            bg: Some(t.card(tone)),
            border: BorderStyle::Rounded,
            border_color: Some(t.border(tone)),
            padding: Edges::symmetric(0, 2),
            gap: 1,
            ..BoxStyle::column()
        })
    }

    // =========================================================================
    // Hero
    // =========================================================================

    fn hero(&mut self) {
        let t = self.theme;
        let content = self.content;
        let hero = &content.hero;

        let section = self.tree.open(BoxStyle {
            bg: Some(t.dark_bg),
            fg: Some(t.dark_text),
            padding: Edges::symmetric(2, 4),
            gap: 1,
            min_height: Dimension::Cells(self.state.height),
            justify: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..BoxStyle::column()
        });
        self.tree.anchor(section, "about", "About");

        let name = self
            .tree
            .text(&hero.name, TextStyle::fg(t.heading(Tone::Dark)).bold().centered());
        self.tree.scroll_fade(
            name,
            ScrollFade {
                distance: self.state.height,
                from: 1.0,
                to: 0.0,
            },
        );

        let tagline = self
            .tree
            .text(&hero.tagline, TextStyle::fg(t.dark_muted).italic().centered());
        self.tree
            .reveal(tagline, BlockKey::new("hero/tagline"), self.timings.entrance(500));

        let bio = self.tree.open(BoxStyle {
            max_width: Some(BIO_MAX_WIDTH),
            ..BoxStyle::column()
        });
        self.tree.text(&hero.bio, TextStyle::fg(t.dark_muted).centered());
        self.tree.close();
        self.tree.reveal(bio, BlockKey::new("hero/bio"), self.timings.entrance(800));

        if !content.education.is_empty() {
            let education = self.tree.open(BoxStyle {
                align_items: AlignItems::Center,
                ..BoxStyle::column()
            });
            for entry in &content.education {
                self.tree.text(
                    format!("{}  {}, {}", entry.period, entry.degree, entry.institution),
                    TextStyle::fg(t.dark_muted).centered(),
                );
            }
            self.tree.close();
            self.tree
                .reveal(education, BlockKey::new("hero/education"), self.timings.entrance(900));
        }

        let resume = self.tree.open(BoxStyle {
            bg: Some(t.accent),
            padding: Edges::symmetric(0, 2),
            ..BoxStyle::row()
        });
        self.tree.text("Download Resume", TextStyle::fg(t.on_accent).bold());
        self.tree.close();
        self.tree
            .reveal(resume, BlockKey::new("hero/resume"), self.timings.entrance(1000));

        self.tree.text(
            "↓ scroll   1-7 jump   c copy email   t chat   q quit",
            TextStyle::fg(t.dark_muted).centered(),
        );
        self.tree.close();
    }

    // =========================================================================
    // Skills
    // =========================================================================

    fn skills(&mut self) {
        let content = self.content;
        let tone = self.open_section("skills", "My Skills", "Skills");
        self.skill_group("Technical Skills", "technical", &content.skills, tone);
        self.skill_group("Tools", "tools", &content.tools, tone);
        self.tree.close();
    }

    fn skill_group(&mut self, title: &str, group: &str, skills: &[Skill], tone: Tone) {
        let t = self.theme;
        self.tree.text(title, TextStyle::fg(t.heading(tone)).bold());

        self.tree.open(BoxStyle {
            wrap: true,
            gap: 2,
            ..BoxStyle::row()
        });
        for (i, skill) in skills.iter().enumerate() {
            let chip = self.tree.open(BoxStyle {
                bg: Some(t.card(tone)),
                border: BorderStyle::Rounded,
                border_color: Some(t.border(tone)),
                padding: Edges::symmetric(0, 1),
                ..BoxStyle::row()
            });
            let label = if skill.icon.is_empty() {
                skill.name.clone()
            } else {
                format!("{} {}", skill.icon, skill.name)
            };
            self.tree.text(label, TextStyle::default());
            self.tree.close();
            self.tree.reveal(
                chip,
                BlockKey::new(format!("skills/{group}/{i}")),
                self.timings.item(SKILL_THRESHOLD, RevealMotion::Fade, i, SKILL_STAGGER_MS),
            );
        }
        self.tree.close();
    }

    // =========================================================================
    // Projects
    // =========================================================================

    fn projects(&mut self) {
        let t = self.theme;
        let content = self.content;
        let tone = self.open_section("projects", "My Projects", "Projects");
        let slide = RevealMotion::SlideUp(self.timings.offset_rows);

        for (i, project) in content.projects.iter().enumerate() {
            let card = self.open_card(tone);
            self.tree.text(&project.title, TextStyle::fg(t.text(tone)).bold());
            self.tree.text(&project.description, TextStyle::fg(t.muted(tone)));

            self.tree.open(BoxStyle {
                wrap: true,
                gap: 1,
                ..BoxStyle::row()
            });
            for tech in &project.tech {
                self.tree.text(format!("[{tech}]"), TextStyle::fg(t.accent_soft));
            }
            self.tree.close();

            self.tree.open(BoxStyle {
                wrap: true,
                gap: 3,
                ..BoxStyle::row()
            });
            self.tree
                .text(format!("GitHub {}", project.github), TextStyle::fg(t.accent));
            self.tree
                .text(format!("Demo {}", project.demo), TextStyle::fg(t.text(tone)));
            self.tree.close();

            self.tree.close();
            self.tree.reveal(
                card,
                BlockKey::new(format!("projects/{i}")),
                self.timings.item(PROJECT_THRESHOLD, slide, i, CARD_STAGGER_MS),
            );
        }

        self.tree.close();
    }

    // =========================================================================
    // Certifications
    // =========================================================================

    fn certifications(&mut self) {
        let t = self.theme;
        let content = self.content;
        let tone = self.open_section("certifications", "Certifications & Achievements", "Certs");
        let threshold = self.timings.section_threshold;

        for (i, cert) in content.certifications.iter().enumerate() {
            let card = self.open_card(tone);
            self.tree.text(&cert.title, TextStyle::fg(t.heading(tone)).bold());
            self.tree
                .text(format!("{}, {}", cert.issuer, cert.date), TextStyle::fg(t.muted(tone)));
            self.tree.text(
                format!("View Credential {}", cert.url),
                TextStyle::fg(t.heading(tone)).underline(),
            );
            self.tree.close();
            self.tree.reveal(
                card,
                BlockKey::new(format!("certifications/{i}")),
                self.timings.item(threshold, RevealMotion::Fade, i, CARD_STAGGER_MS),
            );
        }

        self.tree.close();
    }

    // =========================================================================
    // Coding profiles
    // =========================================================================

    fn profiles(&mut self) {
        let t = self.theme;
        let content = self.content;
        let tone = self.open_section("coding-profiles", "Coding Profiles", "Profiles");
        let threshold = self.timings.section_threshold;

        self.tree.open(BoxStyle {
            wrap: true,
            gap: 2,
            justify: JustifyContent::Center,
            ..BoxStyle::row()
        });
        for profile in &content.profiles {
            self.tree.open(BoxStyle {
                border: BorderStyle::Rounded,
                border_color: Some(t.border(tone)),
                padding: Edges::symmetric(0, 1),
                gap: 1,
                ..BoxStyle::row()
            });
            self.tree.text(&profile.label, TextStyle::fg(t.accent).bold());
            self.tree.text(&profile.url, TextStyle::fg(t.muted(tone)));
            self.tree.close();
        }
        self.tree.close();

        self.tree.open(BoxStyle {
            wrap: true,
            gap: 2,
            justify: JustifyContent::Center,
            ..BoxStyle::row()
        });
        for (i, stat) in content.stats.iter().enumerate() {
            let card = self.tree.open(BoxStyle {
                bg: Some(t.card(tone)),
                border: BorderStyle::Rounded,
                border_color: Some(t.border(tone)),
                padding: Edges::symmetric(0, 3),
                align_items: AlignItems::Center,
                ..BoxStyle::column()
            });
            if !stat.icon.is_empty() {
                self.tree.text(&stat.icon, TextStyle::default());
            }
            let width = string_width(&format_thousands(stat.value)).max(1);
            self.tree
                .dynamic_text(DynamicText::Counter(i), width, TextStyle::fg(t.accent).bold());
            self.tree.text(&stat.label, TextStyle::fg(t.muted(tone)));
            self.tree.close();
            self.tree.reveal(
                card,
                stat_key(i),
                self.timings.item(threshold, RevealMotion::SlideUp(1), i, CARD_STAGGER_MS),
            );
        }
        self.tree.close();

        self.tree.close();
    }

    // =========================================================================
    // Blogs
    // =========================================================================

    fn blogs(&mut self) {
        let t = self.theme;
        let content = self.content;
        let tone = self.open_section("blogs", "My Blogs", "Blogs");

        for blog in &content.blogs {
            self.open_card(tone);
            self.tree.text(&blog.title, TextStyle::fg(t.text(tone)).bold());
            self.tree.text(&blog.date, TextStyle::fg(t.muted(tone)).italic());
            self.tree.text(&blog.snippet, TextStyle::fg(t.muted(tone)));
            self.tree
                .text(format!("Read {}", blog.url), TextStyle::fg(t.heading(tone)).underline());
            self.tree.close();
        }

        self.tree.close();
    }

    // =========================================================================
    // Contact
    // =========================================================================

    fn contact(&mut self) {
        let t = self.theme;
        let content = self.content;
        let contact = &content.contact;
        let tone = self.open_section("contact", "Contact", "Contact");

        self.tree.open(BoxStyle {
            justify: JustifyContent::Center,
            ..BoxStyle::row()
        });
        let card = self.tree.open(BoxStyle {
            bg: Some(t.card(tone)),
            border: BorderStyle::Rounded,
            border_color: Some(t.border(tone)),
            padding: Edges::symmetric(1, 3),
            gap: 1,
            max_width: Some(CONTACT_MAX_WIDTH),
            align_items: AlignItems::Center,
            ..BoxStyle::column()
        });
        self.tree
            .text(&contact.heading, TextStyle::fg(t.accent).bold().centered());
        self.tree
            .text(&contact.message, TextStyle::fg(t.muted(tone)).centered());
        self.tree
            .text(&contact.email, TextStyle::fg(t.text(tone)).bold().centered());

        let button = self.tree.open(BoxStyle {
            bg: Some(t.accent),
            padding: Edges::symmetric(0, 2),
            ..BoxStyle::row()
        });
        self.tree.dynamic_text(
            DynamicText::CopyLabel,
            COPY_LABEL_WIDTH,
            TextStyle::fg(t.on_accent).bold().centered(),
        );
        self.tree.close();
        self.tree.hit(button, HitTarget::CopyEmail);

        self.tree.close();
        self.tree.close();
        self.tree.reveal(
            card,
            BlockKey::new("contact/card"),
            self.timings.item(
                self.timings.section_threshold,
                RevealMotion::SlideUp(self.timings.offset_rows),
                0,
                0,
            ),
        );

        self.tree.close();
    }

    // =========================================================================
    // Footer
    // =========================================================================

    fn footer(&mut self) {
        let t = self.theme;
        let content = self.content;
        let footer = &content.footer;

        self.tree.open(BoxStyle {
            bg: Some(t.dark_bg),
            padding: Edges::symmetric(1, 4),
            gap: 1,
            align_items: AlignItems::Center,
            ..BoxStyle::column()
        });
        self.tree.open(BoxStyle {
            wrap: true,
            gap: 4,
            justify: JustifyContent::Center,
            ..BoxStyle::row()
        });
        for link in &footer.links {
            self.tree
                .text(format!("{} {}", link.label, link.url), TextStyle::fg(t.dark_muted));
        }
        self.tree.close();
        self.tree.text(&footer.credit, TextStyle::fg(t.dark_muted).centered());
        self.tree.close();
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    /// Fixed header: name plus numbered section shortcuts.
    ///
    /// Fully transparent at the top of the page, opaque after one screen.
    fn header(&mut self) {
        let t = self.theme;
        let nav: Vec<String> = self
            .tree
            .anchors()
            .iter()
            .enumerate()
            .map(|(i, anchor)| format!(" {} {} ", i + 1, anchor.label))
            .collect();

        self.tree.open_overlay(BoxStyle::column());
        let bar = self.tree.open(BoxStyle {
            bg: Some(t.chrome),
            fg: Some(t.dark_text),
            padding: Edges::symmetric(0, 2),
            gap: 2,
            justify: JustifyContent::SpaceBetween,
            ..BoxStyle::row()
        });
        self.tree.scroll_fade(
            bar,
            ScrollFade {
                distance: self.state.height,
                from: 0.0,
                to: 1.0,
            },
        );
        self.tree
            .text(&self.content.hero.name, TextStyle::fg(t.accent).bold());

        self.tree.open(BoxStyle {
            wrap: true,
            justify: JustifyContent::FlexEnd,
            ..BoxStyle::row()
        });
        for (i, label) in nav.into_iter().enumerate() {
            let item = self.tree.text(label, TextStyle::fg(t.dark_muted));
            self.tree.hit(item, HitTarget::Jump(i));
        }
        self.tree.close();

        self.tree.close();
        self.tree.close();
    }

    /// Launcher in the bottom-right corner, panel above it when open.
    fn chat(&mut self) {
        let t = self.theme;
        self.tree.open_overlay(BoxStyle {
            justify: JustifyContent::FlexEnd,
            align_items: AlignItems::FlexEnd,
            padding: Edges::symmetric(0, 1),
            gap: 1,
            ..BoxStyle::column()
        });

        let scale = self.state.chat_scale.clamp(0.0, 1.0);
        if scale > 0.0 {
            let full = CHAT_PANEL_WIDTH.min(self.state.width.saturating_sub(2));
            let width = ((full as f32 * scale).round() as u16).max(4);

            self.tree.open(BoxStyle {
                width: Dimension::Cells(width),
                bg: Some(t.chrome),
                fg: Some(t.dark_text),
                border: BorderStyle::Rounded,
                border_color: Some(t.surface_border),
                padding: Edges::symmetric(0, 1),
                gap: 1,
                ..BoxStyle::column()
            });
            self.tree.text(chat::TITLE, TextStyle::fg(t.accent).bold());

            self.tree.open(BoxStyle {
                bg: Some(t.surface_border),
                padding: Edges::symmetric(0, 1),
                ..BoxStyle::column()
            });
            self.tree.text(chat::GREETING, TextStyle::fg(t.dark_muted));
            self.tree.close();

            self.tree.open(BoxStyle {
                bg: Some(t.surface),
                border: BorderStyle::Single,
                border_color: Some(t.surface_border),
                padding: Edges::symmetric(0, 1),
                ..BoxStyle::column()
            });
            self.tree
                .text(chat::PLACEHOLDER, TextStyle::fg(t.dark_muted).italic());
            self.tree.close();

            self.tree.close();
        }

        let launcher = self.tree.open(BoxStyle {
            bg: Some(t.accent),
            ..BoxStyle::row()
        });
        self.tree.dynamic_text(
            DynamicText::ChatLauncher,
            CHAT_LAUNCHER_WIDTH,
            TextStyle::fg(t.on_accent).bold(),
        );
        self.tree.close();
        self.tree.hit(launcher, HitTarget::ToggleChat);

        self.tree.close();
    }
}
