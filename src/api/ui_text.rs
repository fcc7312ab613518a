//! 界面文案
//!
//! 每种语言一张静态表；查找顺序为 当前语言 → 英语 → key 本身

use phf::phf_map;

use crate::models::Locale;

static ENGLISH: phf::Map<&'static str, &'static str> = phf_map! {
    "app_title" => "Educational Assignment Evaluation System",
    "api_key_warning" => "No LLM API key is configured. Set LLM_API_KEY to enable evaluations.",
    "teacher_role" => "Teacher",
    "student_role" => "Student",
    "language_label" => "Language",
    "teacher_dashboard" => "Teacher Dashboard",
    "create_tab" => "Create Assignment",
    "view_tab" => "View Assignments",
    "reports_tab" => "View Reports",
    "create_new" => "Create New Assignment",
    "assignment_name" => "Assignment Name",
    "assignment_instructions" => "Assignment Instructions",
    "questions_slider" => "Number of Questions to Ask Students",
    "questions_help" => "Select how many questions will be asked to evaluate the student's work",
    "learning_obj_title" => "Learning Objectives",
    "learning_obj_desc" => "Define the learning objectives for this assignment.",
    "objective_label" => "Objective",
    "remove_btn" => "Remove",
    "add_obj_btn" => "Add Objective",
    "upload_label" => "Upload Assignment Document (Optional)",
    "create_btn" => "Create Assignment",
    "fields_error" => "Please fill in all required fields (name, instructions, at least one learning objective).",
    "questions_range_error" => "The number of questions must be between 1 and 5.",
    "file_type_error" => "Unsupported file type. Allowed types: pdf, docx, txt.",
    "assignment_created" => "Assignment created successfully!",
    "no_assignments" => "No assignments created yet.",
    "instructions_label" => "Instructions",
    "obj_label" => "Learning Objectives",
    "file_label" => "Attached File",
    "id_label" => "Assignment ID",
    "created_label" => "Created",
    "delete_btn" => "Delete Assignment",
    "assignment_deleted" => "Assignment deleted successfully!",
    "unknown_assignment_error" => "The selected assignment no longer exists.",
    "unknown_assignment" => "Unknown Assignment",
    "view_evals_title" => "View Evaluation Reports",
    "no_evals" => "No evaluations available yet.",
    "reports_for" => "Reports for: ",
    "report_from" => "Report from ",
    "eval_report_label" => "Evaluation Report",
    "detailed_eval_label" => "Detailed Evaluation Data",
    "student_dashboard" => "Student Dashboard",
    "submit_tab" => "Submit Assignment",
    "evals_tab" => "View Evaluations",
    "eval_conversation" => "Evaluation Conversation",
    "evaluation_complete" => "Evaluation complete! Here's your assessment report:",
    "report_not_saved" => "Evaluation complete, but the report could not be saved. Copy it before leaving this page.",
    "upload_text_only" => "Only the content of .txt files is read. PDF and DOCX files are stored but not analyzed.",
    "new_submission_btn" => "Start a New Submission",
    "no_assignments_submit" => "No assignments available for submission.",
    "select_assignment" => "Select Assignment",
    "assignment_details" => "Assignment Details",
    "your_submission" => "Your Submission",
    "response_placeholder" => "Enter your assignment response here",
    "upload_submission" => "Upload Your Assignment (Optional)",
    "submit_btn" => "Submit Assignment",
    "submission_error" => "Please either write your submission or upload a file.",
    "answer_placeholder" => "Type your answer here...",
    "send_btn" => "Send",
    "empty_answer_error" => "Please write an answer before sending.",
    "no_active_conversation" => "There is no evaluation conversation in progress.",
    "conversation_in_progress" => "Finish the current evaluation or start a new submission first.",
    "objective_not_removable" => "The first learning objective cannot be removed.",
    "view_your_evals" => "View Your Evaluations",
    "no_evals_yet" => "No evaluations available yet. Submit an assignment to get evaluated.",
    "report_label" => "Report",
};

static SPANISH: phf::Map<&'static str, &'static str> = phf_map! {
    "app_title" => "Sistema de Evaluación de Tareas Educativas",
    "api_key_warning" => "No hay una clave API de LLM configurada. Define LLM_API_KEY para habilitar las evaluaciones.",
    "teacher_role" => "Profesor",
    "student_role" => "Estudiante",
    "language_label" => "Idioma",
    "teacher_dashboard" => "Panel del Profesor",
    "create_tab" => "Crear Tarea",
    "view_tab" => "Ver Tareas",
    "reports_tab" => "Ver Informes",
    "create_new" => "Crear Nueva Tarea",
    "assignment_name" => "Nombre de la Tarea",
    "assignment_instructions" => "Instrucciones de la Tarea",
    "questions_slider" => "Número de Preguntas para Estudiantes",
    "questions_help" => "Selecciona cuántas preguntas se harán para evaluar el trabajo del estudiante",
    "learning_obj_title" => "Objetivos de Aprendizaje",
    "learning_obj_desc" => "Define los objetivos de aprendizaje para esta tarea.",
    "objective_label" => "Objetivo",
    "remove_btn" => "Eliminar",
    "add_obj_btn" => "Añadir Objetivo",
    "upload_label" => "Subir Documento de Tarea (Opcional)",
    "create_btn" => "Crear Tarea",
    "fields_error" => "Por favor completa todos los campos obligatorios (nombre, instrucciones, al menos un objetivo de aprendizaje).",
    "questions_range_error" => "El número de preguntas debe estar entre 1 y 5.",
    "file_type_error" => "Tipo de archivo no permitido. Tipos permitidos: pdf, docx, txt.",
    "assignment_created" => "¡Tarea creada exitosamente!",
    "no_assignments" => "Aún no hay tareas creadas.",
    "instructions_label" => "Instrucciones",
    "obj_label" => "Objetivos de Aprendizaje",
    "file_label" => "Archivo Adjunto",
    "id_label" => "ID de Tarea",
    "created_label" => "Creado",
    "delete_btn" => "Eliminar Tarea",
    "assignment_deleted" => "¡Tarea eliminada exitosamente!",
    "unknown_assignment_error" => "La tarea seleccionada ya no existe.",
    "unknown_assignment" => "Tarea Desconocida",
    "view_evals_title" => "Ver Informes de Evaluación",
    "no_evals" => "Aún no hay evaluaciones disponibles.",
    "reports_for" => "Informes para: ",
    "report_from" => "Informe del ",
    "eval_report_label" => "Informe de Evaluación",
    "detailed_eval_label" => "Datos Detallados de Evaluación",
    "student_dashboard" => "Panel del Estudiante",
    "submit_tab" => "Entregar Tarea",
    "evals_tab" => "Ver Evaluaciones",
    "eval_conversation" => "Conversación de Evaluación",
    "evaluation_complete" => "¡Evaluación completa! Aquí está tu informe de evaluación:",
    "report_not_saved" => "Evaluación completa, pero el informe no se pudo guardar. Cópialo antes de salir de esta página.",
    "upload_text_only" => "Solo se lee el contenido de los archivos .txt. Los PDF y DOCX se guardan pero no se analizan.",
    "new_submission_btn" => "Iniciar una Nueva Entrega",
    "no_assignments_submit" => "No hay tareas disponibles para entregar.",
    "select_assignment" => "Seleccionar Tarea",
    "assignment_details" => "Detalles de la Tarea",
    "your_submission" => "Tu Entrega",
    "response_placeholder" => "Ingresa tu respuesta a la tarea aquí",
    "upload_submission" => "Subir Tu Tarea (Opcional)",
    "submit_btn" => "Entregar Tarea",
    "submission_error" => "Por favor escribe tu entrega o sube un archivo.",
    "answer_placeholder" => "Escribe tu respuesta aquí...",
    "send_btn" => "Enviar",
    "empty_answer_error" => "Por favor escribe una respuesta antes de enviar.",
    "no_active_conversation" => "No hay ninguna conversación de evaluación en curso.",
    "conversation_in_progress" => "Termina la evaluación actual o inicia una nueva entrega primero.",
    "objective_not_removable" => "El primer objetivo de aprendizaje no se puede eliminar.",
    "view_your_evals" => "Ver Tus Evaluaciones",
    "no_evals_yet" => "Aún no hay evaluaciones disponibles. Entrega una tarea para ser evaluado.",
    "report_label" => "Informe",
};

fn table(locale: Locale) -> &'static phf::Map<&'static str, &'static str> {
    match locale {
        Locale::English => &ENGLISH,
        Locale::Spanish => &SPANISH,
    }
}

/// 查找界面文案
pub fn text<'a>(locale: Locale, key: &'a str) -> &'a str {
    table(locale)
        .get(key)
        .or_else(|| ENGLISH.get(key))
        .copied()
        .unwrap_or(key)
}
