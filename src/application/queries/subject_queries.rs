//! Subject Queries

/// 列出所有课程（仅标题）
#[derive(Debug, Clone)]
pub struct ListSubjects;

/// 获取课程的章节名称（按课程标题）
#[derive(Debug, Clone)]
pub struct GetChapterNames {
    pub subject_title: String,
}

/// 获取单个章节的内容（按课程代码 + 章节代码）
#[derive(Debug, Clone)]
pub struct GetChapterContents {
    pub subject_code: String,
    pub chapter_code: String,
}

/// 获取课程所有章节的练习（按课程标题）
#[derive(Debug, Clone)]
pub struct GetSubjectExercises {
    pub subject_title: String,
}

/// 获取单个章节的练习（按课程代码 + 章节代码）
#[derive(Debug, Clone)]
pub struct GetChapterExercises {
    pub subject_code: String,
    pub chapter_code: String,
}
