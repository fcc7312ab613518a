//! 数据目录：三个 JSON 集合 + 上传文件

use std::path::{Path, PathBuf};

use crate::models::{Assignment, Report, Submission};

use super::json_store::JsonCollection;
use super::upload_store::UploadStore;

pub const ASSIGNMENTS_FILE: &str = "assignments.json";
pub const SUBMISSIONS_FILE: &str = "submissions.json";
pub const EVALUATIONS_FILE: &str = "evaluations.json";

/// 持久化资源的唯一持有者
pub struct Storage {
    root: PathBuf,
    pub assignments: JsonCollection<Assignment>,
    pub submissions: JsonCollection<Submission>,
    /// 评估报告（报告内嵌评估记录）
    pub evaluations: JsonCollection<Report>,
    pub uploads: UploadStore,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            assignments: JsonCollection::new(root.join(ASSIGNMENTS_FILE)),
            submissions: JsonCollection::new(root.join(SUBMISSIONS_FILE)),
            evaluations: JsonCollection::new(root.join(EVALUATIONS_FILE)),
            uploads: UploadStore::new(&root),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
