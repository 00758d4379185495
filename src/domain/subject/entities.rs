//! Subject Context - Entities

use serde::{Deserialize, Serialize};

use super::SubjectError;

/// 章节内容 - 文本 / 图片 / 视频
///
/// `img` 与 `video` 为媒体存储中的相对路径（如 `images/1700000000000-1a2b3c4d.png`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    pub img: String,
    pub video: String,
}

impl Content {
    pub fn new(text: impl Into<String>, img: impl Into<String>, video: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            img: img.into(),
            video: video.into(),
        }
    }
}

/// 练习题
///
/// 不变量:
/// - options 非空
/// - correct_option 必须是 options 中的某一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    question: String,
    options: Vec<String>,
    correct_option: String,
}

impl Exercise {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
    ) -> Result<Self, SubjectError> {
        let correct_option = correct_option.into();
        if options.is_empty() {
            return Err(SubjectError::EmptyOptions);
        }
        if !options.iter().any(|o| *o == correct_option) {
            return Err(SubjectError::CorrectOptionNotListed(correct_option));
        }
        Ok(Self {
            question: question.into(),
            options,
            correct_option,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }
}

/// 章节
///
/// 不变量:
/// - chapter_code 在所属 Subject 内唯一（未强制）
/// - contents / exercises 只追加
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    name: String,
    chapter_code: String,
    contents: Vec<Content>,
    exercises: Vec<Exercise>,
}

impl Chapter {
    /// 创建空章节
    pub fn new(name: impl Into<String>, chapter_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chapter_code: chapter_code.into(),
            contents: Vec::new(),
            exercises: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chapter_code(&self) -> &str {
        &self.chapter_code
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn push_content(&mut self, content: Content) {
        self.contents.push(content);
    }

    pub fn push_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Russia", "Afghanistan", "Pakistan", "Egypt"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_exercise_accepts_listed_answer() {
        let exercise = Exercise::new("Where?", options(), "Pakistan").unwrap();
        assert_eq!(exercise.question(), "Where?");
        assert_eq!(exercise.options().len(), 4);
        assert_eq!(exercise.correct_option(), "Pakistan");
    }

    #[test]
    fn test_exercise_rejects_unlisted_answer() {
        let err = Exercise::new("Where?", options(), "India").unwrap_err();
        assert_eq!(err, SubjectError::CorrectOptionNotListed("India".to_string()));
    }

    #[test]
    fn test_exercise_rejects_empty_options() {
        let err = Exercise::new("Where?", Vec::new(), "").unwrap_err();
        assert_eq!(err, SubjectError::EmptyOptions);
    }

    #[test]
    fn test_chapter_wire_format_is_camel_case() {
        let mut chapter = Chapter::new("Chapter 1", "HIS101CH1");
        chapter.push_exercise(Exercise::new("Where?", options(), "Pakistan").unwrap());

        let json = serde_json::to_value(&chapter).unwrap();
        assert_eq!(json["chapterCode"], "HIS101CH1");
        assert_eq!(json["exercises"][0]["correctOption"], "Pakistan");
        assert_eq!(json["contents"], serde_json::json!([]));
    }

    #[test]
    fn test_contents_keep_append_order() {
        let mut chapter = Chapter::new("Chapter 1", "HIS101CH1");
        chapter.push_content(Content::new("one", "", ""));
        chapter.push_content(Content::new("two", "", ""));
        chapter.push_content(Content::new("one", "", ""));

        let texts: Vec<&str> = chapter.contents().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "one"]);
    }
}
