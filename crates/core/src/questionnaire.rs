//! Questionnaire definitions and the built-in presets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Category, Question, QuestionId};
use crate::scoring::Horizon;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionnaireError {
    #[error("questionnaire has no questions")]
    NoQuestions,

    #[error("category `{name}` references no questions")]
    EmptyCategory { name: String },

    #[error("category `{name}` references question {question} outside 1..={len}")]
    UnknownQuestion {
        name: String,
        question: QuestionId,
        len: usize,
    },

    #[error("horizon boundary {boundary} exceeds category count {len}")]
    BoundaryOutOfRange { boundary: usize, len: usize },
}

/// A fixed set of questions and the categories that aggregate them.
///
/// `horizon_boundary` is the number of leading categories shown as short-term;
/// the rest are long-term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    title: String,
    questions: Vec<Question>,
    categories: Vec<Category>,
    horizon_boundary: usize,
    short_term_label: String,
    long_term_label: String,
}

impl Questionnaire {
    /// # Errors
    ///
    /// Returns `QuestionnaireError` when the configuration could not be scored.
    pub fn new(
        title: impl Into<String>,
        prompts: impl IntoIterator<Item = impl Into<String>>,
        categories: Vec<Category>,
        horizon_boundary: usize,
    ) -> Result<Self, QuestionnaireError> {
        let questions: Vec<Question> = prompts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Question::new(QuestionId::from_index(index), text))
            .collect();

        if questions.is_empty() {
            return Err(QuestionnaireError::NoQuestions);
        }

        for category in &categories {
            if category.questions().is_empty() {
                return Err(QuestionnaireError::EmptyCategory {
                    name: category.name().to_owned(),
                });
            }
            if let Some(&question) = category
                .questions()
                .iter()
                .find(|q| q.index() >= questions.len())
            {
                return Err(QuestionnaireError::UnknownQuestion {
                    name: category.name().to_owned(),
                    question,
                    len: questions.len(),
                });
            }
        }

        if horizon_boundary > categories.len() {
            return Err(QuestionnaireError::BoundaryOutOfRange {
                boundary: horizon_boundary,
                len: categories.len(),
            });
        }

        Ok(Self {
            title: title.into(),
            questions,
            categories,
            horizon_boundary,
            short_term_label: SHORT_TERM_LABEL.to_owned(),
            long_term_label: LONG_TERM_LABEL.to_owned(),
        })
    }

    /// Replaces the tab captions used for the two horizons.
    #[must_use]
    pub fn with_horizon_labels(
        mut self,
        short_term: impl Into<String>,
        long_term: impl Into<String>,
    ) -> Self {
        self.short_term_label = short_term.into();
        self.long_term_label = long_term.into();
        self
    }

    /// Builds one of the bundled questionnaires.
    ///
    /// # Errors
    ///
    /// Propagates validation errors; the bundled data is expected to pass.
    pub fn preset(preset: Preset) -> Result<Self, QuestionnaireError> {
        let (prompts, categories): (&[&str], &[(&str, &[u32])]) = match preset {
            Preset::Standard => (&STANDARD_PROMPTS[..], &STANDARD_CATEGORIES[..]),
            Preset::Compact => (&COMPACT_PROMPTS[..], &COMPACT_CATEGORIES[..]),
        };
        let categories = categories
            .iter()
            .map(|(name, questions)| {
                Category::new(
                    *name,
                    questions.iter().filter_map(|&n| QuestionId::new(n)).collect(),
                )
            })
            .collect();
        let questionnaire = Self::new(
            SURVEY_TITLE,
            prompts.iter().copied(),
            categories,
            SHORT_TERM_CATEGORY_COUNT,
        )?;
        Ok(match preset {
            Preset::Standard => questionnaire,
            Preset::Compact => {
                questionnaire.with_horizon_labels(COMPACT_SHORT_TERM_LABEL, COMPACT_LONG_TERM_LABEL)
            }
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn horizon_boundary(&self) -> usize {
        self.horizon_boundary
    }

    #[must_use]
    pub fn horizon_label(&self, horizon: Horizon) -> &str {
        match horizon {
            Horizon::ShortTerm => &self.short_term_label,
            Horizon::LongTerm => &self.long_term_label,
        }
    }
}

/// Bundled questionnaire variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// 13 questions, long-term half split into cognitive, behavioural and efficacy.
    #[default]
    Standard,
    /// 12 questions, long-term half limited to cognitive and efficacy.
    Compact,
}

impl Preset {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Compact => "compact",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown questionnaire preset: {0}")]
pub struct ParsePresetError(pub String);

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Preset::Standard),
            "compact" => Ok(Preset::Compact),
            _ => Err(ParsePresetError(s.to_owned())),
        }
    }
}

pub const SURVEY_TITLE: &str = "学習エンゲージメントサーベイ";

/// Leading categories shown under the short-term tab in both presets.
pub const SHORT_TERM_CATEGORY_COUNT: usize = 5;

pub const SHORT_TERM_LABEL: &str = "短期的な取り組み";
pub const LONG_TERM_LABEL: &str = "長期的な取り組み";
const COMPACT_SHORT_TERM_LABEL: &str = "現在";
const COMPACT_LONG_TERM_LABEL: &str = "将来";

const SHARED_PROMPTS: [&str; 11] = [
    "興味や関心をもって学んでいる。",
    "楽しみながら学んでいる。",
    "何のために学ぶのかをわかって学んでいる。",
    "学び方を工夫して学んでいる。",
    "一生懸命学んでいる。",
    "粘り強く学んでいる。",
    "やればできる、と思って学んでいる。",
    "他者と協力して学んでいる。",
    "他者と、わからないところは、教えたり教えられたりして学んでいる。",
    "将来の目標を意識して学んでいる。",
    "長期の学習計画を立て、それを調整しながら学んでいる。",
];

const STANDARD_PROMPTS: [&str; 13] = [
    SHARED_PROMPTS[0],
    SHARED_PROMPTS[1],
    SHARED_PROMPTS[2],
    SHARED_PROMPTS[3],
    SHARED_PROMPTS[4],
    SHARED_PROMPTS[5],
    SHARED_PROMPTS[6],
    SHARED_PROMPTS[7],
    SHARED_PROMPTS[8],
    SHARED_PROMPTS[9],
    SHARED_PROMPTS[10],
    "自分の将来のことを考えて、いまの勉強に一生懸命取り組んでいる。",
    "将来の目標はだいたい達成できると思って学んでいる。",
];

const COMPACT_PROMPTS: [&str; 12] = [
    SHARED_PROMPTS[0],
    SHARED_PROMPTS[1],
    SHARED_PROMPTS[2],
    SHARED_PROMPTS[3],
    SHARED_PROMPTS[4],
    SHARED_PROMPTS[5],
    SHARED_PROMPTS[6],
    SHARED_PROMPTS[7],
    SHARED_PROMPTS[8],
    SHARED_PROMPTS[9],
    SHARED_PROMPTS[10],
    "将来の目標はだいたい達成できると思って学んでいる。",
];

const STANDARD_CATEGORIES: [(&str, &[u32]); 8] = [
    ("感情的エンゲージメント", &[1, 2]),
    ("認知的エンゲージメント", &[3, 4]),
    ("行動的エンゲージメント", &[5, 6]),
    ("自己効力感", &[7]),
    ("社会的エンゲージメント", &[8, 9]),
    ("認知的エンゲージメント(長期的)", &[10, 11]),
    ("行動的エンゲージメント(長期的)", &[12]),
    ("自己効力感(長期的)", &[13]),
];

const COMPACT_CATEGORIES: [(&str, &[u32]); 7] = [
    ("感情的エンゲージメント", &[1, 2]),
    ("認知的エンゲージメント", &[3, 4]),
    ("行動的エンゲージメント", &[5, 6]),
    ("自己効力感", &[7]),
    ("社会的エンゲージメント", &[8, 9]),
    ("認知的エンゲージメント(将来)", &[10, 11]),
    ("自己効力感(将来)", &[12]),
];

/// Explanatory entry for one engagement dimension, shown with the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementDimension {
    pub title: &'static str,
    pub description: &'static str,
    pub elements: &'static str,
}

pub const ENGAGEMENT_GUIDE_TITLE: &str =
    "【学習エンゲージメント（主体的に学習に取り組む態度）における５つの観点】";

pub const ENGAGEMENT_DIMENSIONS: [EngagementDimension; 5] = [
    EngagementDimension {
        title: "①感情的エンゲージメント",
        description: "興味や楽しさといったポジティブな感情を伴って取り組んでいることあるいはその態度",
        elements: "代表的な要素：「興味・関心」「楽しさ」",
    },
    EngagementDimension {
        title: "②認知的エンゲージメント",
        description: "物事を深く理解しよう、ハイレベルの技能を身につけようといったような目的（意図）を持ち、自分の学習活動についてきちんと計画し、モニターし、そして自己評価するような問題解決プロセスとして取り組んでいることあるいはその態度",
        elements: "代表的な要素：「目的（意図）・目標」「自己調整」",
    },
    EngagementDimension {
        title: "③行動的エンゲージメント",
        description: "課題に注意を向け努力し粘り強く取り組んでいることあるいはその態度",
        elements: "代表的な要素：「努力」「粘り強さ（持続性）」",
    },
    EngagementDimension {
        title: "④自己効力感",
        description: "努力や粘り強さの背景にある「目標は努力をすれば達成できる」という気持ち",
        elements: "代表的な要素：やればできるという気持ち",
    },
    EngagementDimension {
        title: "⑤社会的エンゲージメント",
        description: "周囲の人と協力したり助け合ったりして取り組んでいることあるいはその態度",
        elements: "代表的な要素：「協力」「助け合い」",
    },
];

pub const REFERENCE_URL: &str = "https://docs.google.com/presentation/d/1QgYQve2DcTd4qLpgHCGuRyhHbAIZyOR_7bG_5Aoo8N8/edit?usp=sharing";

pub const REFERENCE_LABEL: &str = "⇒学習エンゲージメントについてさらに詳しく（リンク）";
