//! 报告目录
//!
//! 把已保存的报告按作业分组，并解析出作业名称。
//! 引用了已删除作业的报告显示为 `<unknown_label> (<id>)`。

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::models::{Assignment, Report};

/// 目录中的一条报告
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub evaluation_id: String,
    pub assignment_name: String,
    pub timestamp: DateTime<Local>,
    pub report: Report,
}

/// 同一作业下的全部报告
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGroup {
    pub assignment_id: String,
    pub assignment_name: String,
    /// 按时间排序
    pub reports: Vec<ReportEntry>,
}

/// 作业名称，作业不存在时使用占位名称
pub fn assignment_name(assignments: &BTreeMap<String, Assignment>, id: &str, unknown_label: &str) -> String {
    assignments
        .get(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("{} ({})", unknown_label, id))
}

/// 所有报告（按时间排序），带作业名称
pub fn list_reports(
    reports: BTreeMap<String, Report>,
    assignments: &BTreeMap<String, Assignment>,
    unknown_label: &str,
) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = reports
        .into_iter()
        .map(|(evaluation_id, report)| ReportEntry {
            assignment_name: assignment_name(assignments, report.assignment_id(), unknown_label),
            timestamp: report.timestamp,
            evaluation_id,
            report,
        })
        .collect();
    entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    entries
}

/// 按作业分组，组按作业名称排序
pub fn group_by_assignment(
    reports: BTreeMap<String, Report>,
    assignments: &BTreeMap<String, Assignment>,
    unknown_label: &str,
) -> Vec<ReportGroup> {
    let mut groups: BTreeMap<String, ReportGroup> = BTreeMap::new();
    for entry in list_reports(reports, assignments, unknown_label) {
        let assignment_id = entry.report.assignment_id().to_string();
        groups
            .entry(assignment_id.clone())
            .or_insert_with(|| ReportGroup {
                assignment_id,
                assignment_name: entry.assignment_name.clone(),
                reports: Vec::new(),
            })
            .reports
            .push(entry);
    }

    let mut groups: Vec<ReportGroup> = groups.into_values().collect();
    groups.sort_by(|a, b| a.assignment_name.cmp(&b.assignment_name));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationRecord, EvaluationRecord, Locale, StructuredEvaluation};
    use chrono::Duration;

    fn report(assignment_id: &str, at: DateTime<Local>) -> Report {
        Report {
            text_report: format!("report for {assignment_id}"),
            evaluation_data: EvaluationRecord {
                timestamp: at,
                raw_evaluation: String::new(),
                structured_evaluation: StructuredEvaluation::default(),
                assignment_id: assignment_id.to_string(),
                learning_objectives: vec![],
                conversation_data: ConversationRecord {
                    questions: vec![],
                    responses: Default::default(),
                    conversation_history: vec![],
                    timestamps: vec![],
                    summary: String::new(),
                    language: Locale::English,
                },
            },
            timestamp: at,
            language: Locale::English,
        }
    }

    #[test]
    fn groups_and_names_reports() {
        let now = Local::now();
        let assignment = Assignment::new("Essay", "Write", vec!["Obj".into()], 3, Locale::English, now);
        let assignments = BTreeMap::from([(assignment.id.clone(), assignment.clone())]);

        let reports = BTreeMap::from([
            ("e2".to_string(), report(&assignment.id, now + Duration::minutes(5))),
            ("e1".to_string(), report(&assignment.id, now)),
            ("e3".to_string(), report("gone", now)),
        ]);

        let groups = group_by_assignment(reports, &assignments, "Unknown Assignment");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].assignment_name, "Essay");
        assert_eq!(
            groups[0].reports.iter().map(|r| r.evaluation_id.as_str()).collect::<Vec<_>>(),
            vec!["e1", "e2"]
        );
        assert_eq!(groups[1].assignment_name, "Unknown Assignment (gone)");
    }
}
