//! Subject Commands

use crate::domain::subject::{Chapter, Content, Exercise};

/// 追加章节命令（按课程标题定位）
#[derive(Debug, Clone)]
pub struct AddChapter {
    pub subject_title: String,
    pub name: String,
    pub chapter_code: String,
}

/// 追加章节内容命令（按课程标题 + 章节代码定位）
///
/// `img` / `video` 可以是上传步骤生成的媒体存储路径
#[derive(Debug, Clone)]
pub struct AddContent {
    pub subject_title: String,
    pub chapter_code: String,
    pub text: String,
    pub img: String,
    pub video: String,
}

/// 追加练习题命令（按课程标题 + 章节代码定位）
#[derive(Debug, Clone)]
pub struct AddExercise {
    pub subject_title: String,
    pub chapter_code: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: String,
}

/// 删除章节命令
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub subject_title: String,
    pub chapter_code: String,
}

/// 创建课程命令（初始化数据时使用）
#[derive(Debug, Clone)]
pub struct CreateSubject {
    pub title: String,
    pub code: String,
    pub chapters: Vec<Chapter>,
}

impl CreateSubject {
    /// 示例课程：History / HST101，带一个章节、一条内容和一道练习
    pub fn sample() -> Self {
        let mut chapter = Chapter::new("Chapter 1: Indus Valley Civilization", "HIS101CH1");
        chapter.push_content(Content::new(
            "Indus Valley Civilization",
            "Indus_Valley_Civilization.png",
            "Indus_Valley_Civilization.mp4",
        ));
        if let Ok(exercise) = Exercise::new(
            "Where are the remains of the Indus Valley Civilization?",
            ["Russia", "Afghanistan", "Pakistan", "Egypt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            "Pakistan",
        ) {
            chapter.push_exercise(exercise);
        }

        Self {
            title: "History".to_string(),
            code: "HST101".to_string(),
            chapters: vec![chapter],
        }
    }
}
