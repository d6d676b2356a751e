//! Built-in sample content that guarantees the app is useful even without
//! an API key: one tree per worksheet type, shaped for each level.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{GenerationParams, Level, WorksheetType};
use crate::error::LlmError;
use crate::llm::ContentSource;

/// Offline collaborator serving the sample trees.
pub struct SeedContent;

#[async_trait]
impl ContentSource for SeedContent {
  fn name(&self) -> &'static str {
    "seed"
  }

  async fn generate(&self, params: &GenerationParams, level: Level) -> Result<Value, LlmError> {
    Ok(sample_content(params.worksheet_type, level))
  }
}

/// A blank shaped the way each level expects: choices at developing, a hint
/// at expected, and an open blank at greater depth when `open_at_depth`.
fn blank(level: Level, word_type: &str, answer: &str, hint: &str, choices: [&str; 3], open_at_depth: bool) -> Value {
  match level {
    Level::Developing => json!({ "type": "blank", "word_type": word_type, "choices": choices, "answer": answer }),
    Level::Expected => json!({ "type": "blank", "word_type": word_type, "hint": hint, "answer": answer }),
    Level::GreaterDepth if open_at_depth => json!({ "type": "blank", "word_type": "open", "answer": answer }),
    Level::GreaterDepth => json!({ "type": "blank", "word_type": word_type, "hint": hint, "answer": answer }),
  }
}

fn text(t: &str) -> Value {
  json!({ "type": "text", "text": t })
}

fn word(level: Level, w: &str, definition: &str) -> Value {
  if level.is_developing() { json!({ "word": w, "definition": definition }) } else { json!(w) }
}

fn extension(level: Level, title: &str, instructions: &str) -> Value {
  if level.is_developing() { Value::Null } else { json!({ "title": title, "instructions": instructions }) }
}

fn hint_words(level: Level, words: &[&str]) -> Value {
  if level.is_developing() { json!(words) } else { Value::Null }
}

pub fn sample_content(kind: WorksheetType, level: Level) -> Value {
  match kind {
    WorksheetType::Cloze => cloze(level),
    WorksheetType::WordBank => word_bank(level),
    WorksheetType::Matching => matching(level),
    WorksheetType::SentenceBuilder => sentence_builder(level),
    WorksheetType::ReadingComprehension => reading(level),
    WorksheetType::ProblemSolving => problem_solving(level),
    WorksheetType::CalculationPractice => calculation(level),
    WorksheetType::Investigation => investigation(level),
  }
}

fn cloze(level: Level) -> Value {
  json!({
    "title": "Lava Lab",
    "word_bank": [
      { "word_type": "time", "words": [word(level, "Suddenly", "all at once"), word(level, "Later", "after some time")] },
      { "word_type": "adjective", "words": [word(level, "glowing", "shining with light"), word(level, "fierce", "strong and wild")] },
      { "word_type": "verb", "words": [word(level, "rumbled", "made a deep sound"), word(level, "flowed", "moved like a river")] },
      { "word_type": "noun", "words": [word(level, "magma", "hot melted rock"), word(level, "crater", "the bowl at the top")] }
    ],
    "sections": [
      {
        "title": "THE ERUPTION",
        "reminder": "Use a time word to start your sentence!",
        "paragraphs": [
          [
            blank(level, "time", "Suddenly", "a word that shows something happened quickly", ["Suddenly", "Slowly", "Yesterday"], false),
            text(" the ground began to shake. The volcano erupts with "),
            blank(level, "noun", "magma", "a hot, melted rock", ["magma", "water", "sand"], false),
            text(".")
          ],
          [
            text("A "),
            blank(level, "adjective", "glowing", "a word describing light", ["glowing", "cold", "tiny"], true),
            text(" river of lava "),
            blank(level, "verb", "flowed", "how a liquid moves", ["flowed", "jumped", "sang"], false),
            text(" down the mountain.")
          ]
        ]
      },
      {
        "title": "THE AFTERMATH",
        "paragraphs": [
          [
            blank(level, "time", "Later", "a word that shows time has passed", ["Later", "Before", "Never"], false),
            text(", grey ash covered the "),
            blank(level, "noun", "crater", "the hole at the top of a volcano", ["crater", "river", "cloud"], true),
            text(".")
          ]
        ]
      }
    ],
    "success_criteria": [
      "I can choose a noun that fits the sentence",
      "I can use time words to start sentences",
      "I can use describing words to add detail"
    ]
  })
}

fn word_bank(level: Level) -> Value {
  json!({
    "title": "Wild Weather Words",
    "categories": [
      { "word_type": "adjective", "words": [word(level, "stormy", "wild and windy"), word(level, "icy", "very cold"), word(level, "humid", "warm and damp")] },
      { "word_type": "noun", "words": [word(level, "thunder", "the loud sound after lightning"), word(level, "drizzle", "light rain")] },
      { "word_type": "verb", "words": [word(level, "howled", "made a long loud cry"), word(level, "froze", "turned to ice")] }
    ],
    "activities": [
      {
        "title": "Complete the Forecast",
        "instructions": "Choose the best word for each gap.",
        "sentences": [
          [ text("It was a "), blank(level, "adjective", "stormy", "a word for wild weather", ["stormy", "sunny", "calm"], false), text(" night.") ],
          [ text("The wind "), blank(level, "verb", "howled", "a sound the wind makes", ["howled", "whispered", "smiled"], true), text(" through the trees.") ],
          [ text("We heard "), blank(level, "noun", "thunder", "a loud noise in a storm", ["thunder", "music", "birds"], false), text(" in the distance.") ]
        ]
      }
    ],
    "success_criteria": ["I can use weather words in sentences", "I can choose words that fit the meaning"]
  })
}

fn matching(level: Level) -> Value {
  let mut pairs = vec![
    json!({ "left": "Sun", "right": "A star at the centre of our solar system" }),
    json!({ "left": "Moon", "right": "Orbits Earth" }),
    json!({ "left": "Mars", "right": "The red planet" }),
    json!({ "left": "Jupiter", "right": "The largest planet" }),
  ];
  if !level.is_developing() {
    pairs.push(json!({ "left": "Comet", "right": "An icy body with a glowing tail" }));
    pairs.push(json!({ "left": "Orbit", "right": "The curved path around a star or planet" }));
  }
  json!({
    "title": "Planet Pairs",
    "activities": [
      { "title": "Our Solar System", "instructions": "Draw a line from each word to its meaning.", "pairs": pairs }
    ],
    "bonus_activity": extension(level, "Design a Planet", "Invent a new planet and describe three facts about it."),
    "success_criteria": ["I can match space words to their meanings", "I can explain what an orbit is"]
  })
}

fn sentence_builder(level: Level) -> Value {
  json!({
    "title": "Castle Sentences",
    "exercises": [
      {
        "title": "The Dragon",
        "instructions": "Put the cards in order to build a sentence.",
        "sentence_parts": [
          { "part": "The", "word_type": "name" },
          { "part": "fierce", "word_type": "adjective" },
          { "part": "dragon", "word_type": "noun" },
          { "part": "flew", "word_type": "verb" },
          { "part": "over", "word_type": "preposition" },
          { "part": "the castle", "word_type": "noun" },
          { "part": ".", "word_type": "punctuation" }
        ],
        "correct_sentence": "The fierce dragon flew over the castle."
      },
      {
        "title": "The Knight",
        "sentence_parts": [
          { "part": "Bravely", "word_type": "adverb" },
          { "part": "the knight", "word_type": "noun" },
          { "part": "climbed", "word_type": "verb" },
          { "part": "the tower", "word_type": "noun" },
          { "part": ".", "word_type": "punctuation" }
        ],
        "correct_sentence": "Bravely the knight climbed the tower."
      }
    ],
    "extension": extension(level, "Your Own Sentence", "Write a sentence about the castle using an adverb and a preposition."),
    "success_criteria": ["I can order words to make a sentence", "I can start a sentence with a capital letter"]
  })
}

fn reading(level: Level) -> Value {
  let passage = match level {
    Level::Developing => "Mia ran to the window. Snow! Everything was white.\n\nShe put on her red coat and her boots. Outside, the snow crunched under her feet.",
    _ => "Mia pressed her nose against the frosty window. Overnight, the village had vanished beneath a thick white blanket.\n\nShe pulled on her red coat and hurried outside, where the snow crunched like sugar under her boots. Somewhere, a robin was singing.",
  };
  json!({
    "title": "The Snow Day",
    "passage": { "title": "Snow!", "text": passage, "source_note": "An original story" },
    "vocabulary": [
      { "word": "frosty", "definition": "covered in ice crystals", "word_type": "adjective" },
      { "word": "crunched", "definition": "made a crushing sound", "word_type": "verb" }
    ],
    "questions": [
      { "number": 1, "question": "What colour was Mia's coat?", "question_type": "retrieval", "marks": 1, "lines": 1, "answer": "Red.", "word_bank": hint_words(level, &["red", "coat"]) },
      { "number": 2, "question": "How do you think Mia felt when she saw the snow? Why?", "question_type": "inference", "marks": 2, "lines": 3, "answer": "Excited, because she hurried outside.", "word_bank": hint_words(level, &["excited", "happy"]) },
      { "number": 3, "question": "Why did the author compare the snow to sugar?", "question_type": "author_intent", "marks": 2, "lines": 3, "answer": "To show how it sounded and looked when she stepped on it." }
    ],
    "success_criteria": ["I can find information in a text", "I can explain how a character feels"]
  })
}

fn problem_solving(level: Level) -> Value {
  let cakes = if level.is_developing() { 12 } else { 24 };
  json!({
    "title": "The Bake Sale",
    "scenario": {
      "title": "Class 4 Bake Sale",
      "text": format!("Class 4 baked {cakes} cupcakes for the school bake sale. Each cupcake costs 50p."),
      "data": [ { "label": "Cupcakes baked", "value": cakes }, { "label": "Price each", "value": "50p" } ]
    },
    "questions": [
      { "question": "If 9 cupcakes are sold, how many are left?", "question_type": "calculate", "marks": 1, "answer": cakes - 9, "word_bank": hint_words(level, &["take away", "left"]) },
      { "question": "How much money is made if every cupcake is sold?", "question_type": "calculate", "marks": 2, "answer": format!("£{:.2}", cakes as f32 * 0.5) },
      { "question": "Is it better to sell cupcakes in packs of 3 for £1? Explain.", "question_type": "explain", "marks": 3, "lines": 3, "answer": "No, 3 cupcakes cost £1.50 when sold singly." }
    ],
    "success_criteria": ["I can pick out the important numbers", "I can explain my reasoning"]
  })
}

fn calculation(level: Level) -> Value {
  let calcs = match level {
    Level::Developing => json!([
      { "question": "3 x 4 =", "answer": 12, "working_hint": "count in 3s" },
      { "question": "5 x 2 =", "answer": 10, "working_hint": "count in 5s" },
      { "question": "10 x 3 =", "answer": 30 }
    ]),
    _ => json!([
      { "question": "6 x 7 =", "answer": 42, "working_hint": "double 3 x 7" },
      { "question": "8 x 9 =", "answer": 72 },
      { "question": "12 x 4 =", "answer": 48, "working_hint": "10 x 4 + 2 x 4" },
      { "question": "7 x 11 =", "answer": 77 }
    ]),
  };
  json!({
    "title": "Times Table Challenge",
    "sections": [
      { "title": "Warm Up", "instructions": "Show your working in the box.", "calculations": calcs },
      { "title": "Missing Numbers", "calculations": [ { "question": "__ x 5 = 35", "answer": 7 } ] }
    ],
    "challenge": extension(level, "Beat the Clock", "Write five multiplication facts that make 24."),
    "success_criteria": ["I can recall multiplication facts", "I can find missing numbers"]
  })
}

fn investigation(level: Level) -> Value {
  let prediction_choices = if level.is_developing() {
    json!(["The tennis ball", "The football", "The ping-pong ball"])
  } else {
    Value::Null
  };
  let rows = if level.is_developing() { 3 } else { 5 };
  json!({
    "title": "Bouncing Balls",
    "investigation": {
      "question": "Which ball bounces the highest?",
      "prediction": "I predict that the ... will bounce highest because ...",
      "prediction_choices": prediction_choices,
      "variables": {
        "change": "The type of ball",
        "measure": "How high it bounces (cm)",
        "keep_same": ["Drop height", "Floor surface", "Person measuring"]
      }
    },
    "equipment": ["Three different balls", "Metre stick", "Sticky notes"],
    "method": ["Hold the ball next to the metre stick at 1 m.", "Drop the ball without pushing it.", "Mark how high it bounces.", "Repeat three times."],
    "results_table": { "columns": ["Ball", "Bounce 1", "Bounce 2", "Bounce 3"], "units": ["", "cm", "cm", "cm"], "rows": rows },
    "conclusion_prompts": ["I found that...", "My prediction was correct/incorrect because..."],
    "success_criteria": ["I can keep a test fair", "I can record my results in a table"]
  })
}
