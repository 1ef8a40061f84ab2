//! Tutorial stages and the built-in curriculum.
//!
//! A stage carries the snippet the editor is reset to, the mission text shown
//! to the player, and a predicate deciding when the mission is solved.

use crate::error::CoreError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Identifier of a curriculum stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageId {
    Intro,
    CssStyling,
    ReactState,
    Completed,
}

impl StageId {
    pub const ALL: [StageId; 4] = [
        StageId::Intro,
        StageId::CssStyling,
        StageId::ReactState,
        StageId::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StageId::Intro => "intro",
            StageId::CssStyling => "css-styling",
            StageId::ReactState => "react-state",
            StageId::Completed => "completed",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StageId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownStage(s.to_string()))
    }
}

/// One lesson: what to show, where the editor starts, and when it is solved.
#[derive(Clone, Debug, Serialize)]
pub struct Stage {
    pub id: StageId,
    pub title: &'static str,
    pub description: &'static str,
    pub mission: &'static str,
    pub initial_code: &'static str,
    pub solution_hint: &'static str,
    pub explanation: &'static str,
    pub success_message: &'static str,
    #[serde(skip)]
    validator: fn(&str) -> bool,
}

impl Stage {
    /// Whether `code` satisfies this stage's mission.
    pub fn validate(&self, code: &str) -> bool {
        (self.validator)(code)
    }
}

/// Ordered source of stages.
pub trait StageProvider {
    /// All stages in play order. Never empty for a usable provider.
    fn stages(&self) -> &[Stage];

    fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages().iter().find(|stage| stage.id == id)
    }

    fn position(&self, id: StageId) -> Option<usize> {
        self.stages().iter().position(|stage| stage.id == id)
    }
}

/// The fixed tutorial: markup, styling, state, graduation.
#[derive(Clone, Debug)]
pub struct Curriculum {
    stages: Vec<Stage>,
}

impl Curriculum {
    pub fn builtin() -> Self {
        Self {
            stages: vec![intro(), css_styling(), react_state(), completed()],
        }
    }

    /// Look up a stage by id.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownStage`] when the curriculum lacks `id`.
    pub fn get(&self, id: StageId) -> Result<&Stage, CoreError> {
        self.stage(id)
            .ok_or_else(|| CoreError::UnknownStage(id.to_string()))
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StageProvider for Curriculum {
    fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h1>.+</h1>").expect("static regex"));
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>.+</p>").expect("static regex"));

fn intro_solved(code: &str) -> bool {
    HEADING.is_match(code) && PARAGRAPH.is_match(code)
}

fn css_solved(code: &str) -> bool {
    ["bg-blue-500", "text-white", "rounded-lg"]
        .iter()
        .all(|class| code.contains(class))
}

fn react_solved(code: &str) -> bool {
    code.contains("useState(0)") && code.contains("setCount(count + 1)")
}

fn never(_: &str) -> bool {
    false
}

fn intro() -> Stage {
    Stage {
        id: StageId::Intro,
        title: "Chapter 1: The Skeleton (HTML)",
        description: "A web page is like a body, and HTML is its skeleton. Repair this page's \
                      heading and intro so it can show its content.",
        mission: "Wrap 'Hello World' in an <h1> tag and 'I am the new hacker' in a <p> tag.",
        initial_code: "<div>\n  <!-- heading goes here -->\n  \n  <!-- paragraph goes here -->\n  \n</div>",
        solution_hint: "<h1>Hello World</h1>\n<p>I am the new hacker</p>",
        explanation: "HTML wraps content in tags.\n\
                      1. Find the line below <!-- heading goes here -->.\n\
                      2. Type <h1>Hello World</h1>.\n   \
                      - <h1> is Heading 1, normally the page's main title.\n\
                      3. Find the line below <!-- paragraph goes here -->.\n\
                      4. Type <p>I am the new hacker</p>.\n   \
                      - <p> is a Paragraph, used for ordinary text.",
        success_message: "Skeleton repaired! The system recognizes the content structure.",
        validator: intro_solved,
    }
}

fn css_styling() -> Stage {
    Stage {
        id: StageId::CssStyling,
        title: "Chapter 2: The Skin (Tailwind CSS)",
        description: "The skeleton is ugly. CSS is the clothing and make-up. Make this button \
                      look better using Tailwind class names.",
        mission: "Give the <button> a className with a blue background (bg-blue-500), white \
                  text (text-white), rounded corners (rounded-lg) and padding (p-2).",
        initial_code: r#"<div className="flex items-center justify-center h-screen">
  <div className="bg-white p-6 shadow-xl rounded-2xl">
    <h2 className="text-2xl font-bold mb-4">Profile</h2>

    <!-- change the button below -->
    <button className="">
      Follow
    </button>

  </div>
</div>"#,
        solution_hint: "<button className=\"bg-blue-500 text-white rounded-lg p-2\">\n  Follow\n</button>",
        explanation: "Fill the button's className attribute with style classes separated by spaces:\n\
                      1. bg-blue-500: background color blue, shade 500.\n\
                      2. text-white: text color white.\n\
                      3. rounded-lg: large rounded corners.\n\
                      4. p-2: padding of 2 units.\n\n\
                      Type these words between the quotes of className=\"\".",
        success_message: "Visual module loaded! The interface is brand new.",
        validator: css_solved,
    }
}

fn react_state() -> Stage {
    Stage {
        id: StageId::ReactState,
        title: "Chapter 3: The Soul (React State)",
        description: "The page is lifeless. JS and React give it a soul and interaction. Make \
                      the counter move.",
        mission: "1. Complete useState(0). 2. Call setCount(count + 1) in onClick.",
        initial_code: r#"import React, { useState } from 'react';

function Counter() {
  // Task 1: define the count state here
  const [count, setCount] =

  return (
    <div className="p-8 text-center">
      <h1 className="text-4xl mb-4">{count}</h1>
      <button
        className="bg-indigo-600 text-white px-4 py-2 rounded"
        // Task 2: add the click handler here
        onClick={}
      >
        Like
      </button>
    </div>
  );
}
"#,
        solution_hint: "const [count, setCount] = useState(0);\n// ...\nonClick={() => setCount(count + 1)}",
        explanation: "React components need \"state\" to remember data:\n\
                      1. Task 1: initialize the state.\n   \
                      Type: useState(0)\n   \
                      This creates a variable count starting at 0. setCount is the function that changes it.\n\n\
                      2. Task 2: handle the click.\n   \
                      Inside the braces of onClick={} type an arrow function:\n   \
                      () => setCount(count + 1)\n   \
                      When clicked, setCount stores count + 1 as the new value.",
        success_message: "Neural link established! Interaction logic is running.",
        validator: react_solved,
    }
}

fn completed() -> Stage {
    Stage {
        id: StageId::Completed,
        title: "Graduation: Free Hacker",
        description: "You have mastered the basics. HTML builds structure, CSS shapes the look, \
                      React drives the logic.",
        mission: "You have graduated. Copy this code and start building real projects.",
        initial_code: "// Congratulations! You have finished every training course.\n\
                       // Next step: install Node.js and VS Code and start your real journey.",
        solution_hint: "",
        explanation: "Congratulations! You have taken your first step into full-stack development.",
        success_message: "",
        validator: never,
    }
}
