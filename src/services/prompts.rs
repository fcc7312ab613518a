//! 提示词与智能体文案
//!
//! 每种 [`Locale`] 一套完整的 [`PromptSet`]，调用方只通过 [`prompts`] 取用

use crate::models::{FallbackText, Locale};

/// 一种语言的全部提示词模板与固定文案
///
/// 模板中的 `{name}` 占位符由 [`fill`] 替换
#[derive(Debug)]
pub struct PromptSet {
    // --- 问题生成 ---
    pub question_system: &'static str,
    pub question_user: &'static str,

    // --- 对话 ---
    pub intro: &'static str,
    pub acknowledgement: &'static str,
    pub completion: &'static str,
    pub question_label: &'static str,
    pub response_label: &'static str,
    pub summary_system: &'static str,
    pub summary_user: &'static str,
    pub summary_failed: &'static str,

    // --- 评估 ---
    pub evaluation_system: &'static str,
    pub evaluation_comprehension: &'static str,
    pub evaluation_objectives: &'static str,
    pub evaluation_overall: &'static str,
    /// 三段评估的小节标题（理解/目标/整体）
    pub section_headers: [&'static str; 3],
    /// 某一段评估调用失败时的替代文本
    pub section_failed: [&'static str; 3],
    pub response_times_unavailable: &'static str,
    pub response_time_line: &'static str,
    pub structured_system: &'static str,
    pub structured_user: &'static str,
    pub fallback: FallbackText,

    // --- 报告 ---
    pub report_system: &'static str,
    pub report_user: &'static str,
    pub report_failed: &'static str,
}

/// 获取指定语言的提示词
pub fn prompts(locale: Locale) -> &'static PromptSet {
    match locale {
        Locale::English => &ENGLISH,
        Locale::Spanish => &SPANISH,
    }
}

/// 单次扫描替换 `{name}` 占位符
///
/// 已替换进去的内容不会被再次解析，未知占位符原样保留
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// 学习目标列表格式化为 `- ` 项目符号
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

static ENGLISH: PromptSet = PromptSet {
    question_system: "You are an expert educational assessment agent. \
Your task is to generate thoughtful questions based on assignment instructions and learning objectives. \
The questions should help evaluate the student's understanding and achievement of learning objectives. \
Generate questions that are clear, specific, and directly related to the learning objectives.",
    question_user: "Assignment Instructions:\n{assignment_text}\n\n\
Learning Objectives:\n{learning_objectives}\n\n\
Generate {num_questions} questions that will help assess if a student has met these learning objectives. \
Return them as a numbered list, one question per line.",

    intro: "I'd like to ask you a few questions about your assignment to understand your thought process better.",
    acknowledgement: "Thank you for your response.",
    completion: "Thank you for answering all the questions. I'll now analyze your responses.",
    question_label: "Question",
    response_label: "Response",
    summary_system: "You are an educational assessment expert. Summarize the following student responses to questions.",
    summary_user: "Here are the questions and student responses:\n{conversation}\n\n\
Provide a concise summary of the conversation highlighting key points from the student's responses.",
    summary_failed: "Sorry, the conversation summary could not be generated.",

    evaluation_system: "You are an expert educational evaluator. \
Your task is to assess student work and conversation responses against specific learning objectives. \
Provide a fair, balanced, and constructive evaluation. Back up your assessments with specific evidence from the student's work and responses. \
Carefully analyze the authenticity of the work, detecting possible plagiarism or copied content.",
    evaluation_comprehension: "Assignment Instructions:\n{assignment_text}\n\n\
Student Submission:\n{submission_text}\n\n\
Conversation Summary:\n{conversation_summary}\n\n\
Response times: {response_times}\n\n\
Evaluate the student's work on the following criteria:\n\
1. Comprehension (0-100) - How well does the student understand the core concepts?\n\
2. Authenticity (0-100) - Is the work original and does it show the student's own thinking? Detect copied or plagiarized content.\n\
3. Relational skills (0-100) - How does the student connect different concepts and ideas?\n\
4. Argumentation (0-100) - How well structured and supported are the arguments?\n\
5. Bibliography use (0-100) - Does the student cite or reference appropriate sources?\n\n\
For each criterion, provide:\n\
- A score (0-100, where 100 is excellent)\n\
- Specific examples from the work or conversation\n\
- Constructive feedback\n\n\
Also analyze:\n\
- Consistency between the written work and the answers in the conversation\n\
- Whether response times are consistent with the amount of content (very elaborate answers in very short times may indicate pre-generated content)\n\
- State clearly whether you detect copy-paste or plagiarism, providing evidence",
    evaluation_objectives: "Assignment Instructions:\n{assignment_text}\n\n\
Learning Objectives:\n{learning_objectives}\n\n\
Student Submission:\n{submission_text}\n\n\
Conversation Summary:\n{conversation_summary}\n\n\
Full Conversation:\n{conversation_details}\n\n\
Evaluate how well the student's work achieves each of the following learning objectives. \
For each objective, provide:\n\
- A score (0-100, where 100 is excellent)\n\
- Specific examples from the work or conversation\n\
- Constructive feedback",
    evaluation_overall: "Assignment Instructions:\n{assignment_text}\n\n\
Student Submission:\n{submission_text}\n\n\
Full Conversation:\n{conversation_details}\n\n\
Evaluate the overall quality of the student's work, considering clarity, organization, and depth of thought.\n\
Provide:\n\
- An overall score (0-100, where 100 is excellent)\n\
- Specific examples from the work\n\
- Constructive feedback\n\n\
Also give a final analysis of the originality of the work and the consistency between the written submission and the answers given during the conversation.",
    section_headers: [
        "# Comprehension and Authenticity Evaluation",
        "# Learning Objectives Evaluation",
        "# Overall Quality Evaluation",
    ],
    section_failed: [
        "Error in the comprehension and authenticity evaluation.",
        "Error in the learning objectives evaluation.",
        "Error in the overall quality evaluation.",
    ],
    response_times_unavailable: "Not available",
    response_time_line: "Question {n}: {seconds} seconds for {chars} characters",
    structured_system: "You are an AI assistant that structures evaluation data. \
Convert the following evaluation into a structured JSON format with the exact keys expected.",
    structured_user: "Evaluation:\n{evaluation}\n\n\
Convert this into a JSON structure with the following keys:\n\
- comprehension: {score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}\n\
- authenticity: {score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}\n\
- relational_skills: {score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}\n\
- argumentation: {score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}\n\
- bibliography_use: {score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}\n\
- learning_objectives: [{objective: (text of objective), score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}]\n\
- overall_quality: {score: (number 0-100), examples: (text with examples), feedback: (constructive feedback)}\n\
- plagiarism_detected: (boolean true/false)\n\
- plagiarism_evidence: (text explaining evidence of plagiarism if detected)\n\
- response_time_analysis: (text analyzing if response times are consistent with content)\n\
- summary: (A brief summary of the evaluation)",
    fallback: FallbackText {
        not_available: "N/A",
        format_error: "Evaluation format error",
        plagiarism_unavailable: "Plagiarism could not be assessed because of a formatting error",
        response_time_unavailable: "Response times could not be analyzed because of a formatting error",
        summary_error: "There was an error in the format of the evaluation results.",
    },

    report_system: "You are an expert educational report generator. \
Your task is to create clear, comprehensive, and constructive reports based on student evaluations. \
Focus on providing actionable feedback that will help the student improve.",
    report_user: "Evaluation Data:\n{evaluation_json}\n\n\
Generate a comprehensive educational assessment report with the following sections:\n\
1. Executive Summary - Brief overview of strengths and areas for improvement\n\
2. Assessment of Learning Objectives - Detailed evaluation for each objective\n\
3. Comprehension Analysis - Evaluation of conceptual understanding\n\
4. Authenticity Assessment - Evaluation of originality and personal engagement\n\
5. Overall Quality - General assessment of the work\n\
6. Recommendations - Specific, actionable suggestions for improvement\n\n\
The report should be professional but encouraging. Use specific examples from the student's work and responses.",
    report_failed: "Error generating the report.",
};

static SPANISH: PromptSet = PromptSet {
    question_system: "Eres un agente experto en evaluación educativa. \
Tu tarea es generar preguntas reflexivas basadas en las instrucciones de la tarea y los objetivos de aprendizaje. \
Las preguntas deben ayudar a evaluar la comprensión del estudiante y el logro de los objetivos de aprendizaje. \
Genera preguntas claras, específicas y directamente relacionadas con los objetivos de aprendizaje.",
    question_user: "Instrucciones de la tarea:\n{assignment_text}\n\n\
Objetivos de aprendizaje:\n{learning_objectives}\n\n\
Genera {num_questions} preguntas que ayuden a evaluar si un estudiante ha alcanzado estos objetivos de aprendizaje. \
Devuélvelas como una lista numerada, una pregunta por línea.",

    intro: "Me gustaría hacerte algunas preguntas sobre tu tarea para entender mejor tu proceso de pensamiento.",
    acknowledgement: "Gracias por tu respuesta.",
    completion: "Gracias por responder todas las preguntas. Ahora analizaré tus respuestas.",
    question_label: "Pregunta",
    response_label: "Respuesta",
    summary_system: "Eres un experto en evaluación educativa. Resume las siguientes respuestas del estudiante a las preguntas.",
    summary_user: "Aquí están las preguntas y las respuestas del estudiante:\n{conversation}\n\n\
Proporciona un resumen conciso de la conversación destacando los puntos clave de las respuestas del estudiante.",
    summary_failed: "No se pudo generar el resumen de la conversación.",

    evaluation_system: "Eres un evaluador educativo experto. \
Tu tarea es evaluar el trabajo del estudiante y las respuestas de la conversación en relación con objetivos de aprendizaje específicos. \
Proporciona una evaluación justa, equilibrada y constructiva. Respalda tus evaluaciones con ejemplos específicos del trabajo y las respuestas del estudiante. \
Debes analizar cuidadosamente la autenticidad del trabajo, detectando posible plagio o contenido copiado.",
    evaluation_comprehension: "Instrucciones de la tarea:\n{assignment_text}\n\n\
Entrega del estudiante:\n{submission_text}\n\n\
Resumen de la conversación:\n{conversation_summary}\n\n\
Tiempos de respuesta: {response_times}\n\n\
Evalúa el trabajo del estudiante según los siguientes criterios:\n\
1. Comprensión (0-100) - ¿Qué tan bien comprende el estudiante los conceptos centrales?\n\
2. Autenticidad (0-100) - ¿Es el trabajo original y muestra el propio pensamiento del estudiante? Detecta si hay contenido copiado o plagiado.\n\
3. Habilidades relacionales (0-100) - ¿Cómo conecta el estudiante diferentes conceptos e ideas?\n\
4. Argumentación (0-100) - ¿Qué tan bien estructurados y fundamentados están sus argumentos?\n\
5. Uso de bibliografía (0-100) - ¿Cita o hace referencia a bibliografía adecuada?\n\n\
Para cada criterio, proporciona:\n\
- Una puntuación (0-100, donde 100 es excelente)\n\
- Ejemplos específicos del trabajo o la conversación\n\
- Retroalimentación constructiva\n\n\
Analiza también:\n\
- Consistencia entre el trabajo escrito y las respuestas en la conversación\n\
- Si los tiempos de respuesta son coherentes con la cantidad de contenido (respuestas muy elaboradas en tiempos muy cortos podrían indicar uso de contenido pregenerado)\n\
- Indica claramente si detectas copypaste o plagio, proporcionando evidencia",
    evaluation_objectives: "Instrucciones de la tarea:\n{assignment_text}\n\n\
Objetivos de aprendizaje:\n{learning_objectives}\n\n\
Entrega del estudiante:\n{submission_text}\n\n\
Resumen de la conversación:\n{conversation_summary}\n\n\
Conversación completa:\n{conversation_details}\n\n\
Evalúa qué tan bien el trabajo del estudiante logra cada uno de los siguientes objetivos de aprendizaje. \
Para cada objetivo, proporciona:\n\
- Una puntuación (0-100, donde 100 es excelente)\n\
- Ejemplos específicos del trabajo o la conversación\n\
- Retroalimentación constructiva",
    evaluation_overall: "Instrucciones de la tarea:\n{assignment_text}\n\n\
Entrega del estudiante:\n{submission_text}\n\n\
Conversación completa:\n{conversation_details}\n\n\
Evalúa la calidad general del trabajo del estudiante, considerando claridad, organización y profundidad de pensamiento.\n\
Proporciona:\n\
- Una puntuación global (0-100, donde 100 es excelente)\n\
- Ejemplos específicos del trabajo\n\
- Retroalimentación constructiva\n\n\
Realiza también un análisis final sobre la originalidad del trabajo y la coherencia entre la entrega escrita y las respuestas durante la conversación.",
    section_headers: [
        "# Evaluación de comprensión, autenticidad y habilidades",
        "# Evaluación de objetivos de aprendizaje",
        "# Evaluación de calidad general y análisis de originalidad",
    ],
    section_failed: [
        "Error en evaluación de comprensión y autenticidad.",
        "Error en evaluación de objetivos de aprendizaje.",
        "Error en evaluación de calidad general.",
    ],
    response_times_unavailable: "No disponible",
    response_time_line: "Pregunta {n}: {seconds} segundos para {chars} caracteres",
    structured_system: "Eres un asistente de IA que estructura datos de evaluación. \
Convierte la siguiente evaluación en un formato JSON estructurado con las claves exactas esperadas.",
    structured_user: "Evaluación:\n{evaluation}\n\n\
Convierte esto en una estructura JSON con las siguientes claves:\n\
- comprehension: {score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}\n\
- authenticity: {score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}\n\
- relational_skills: {score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}\n\
- argumentation: {score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}\n\
- bibliography_use: {score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}\n\
- learning_objectives: [{objective: (texto del objetivo), score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}]\n\
- overall_quality: {score: (número 0-100), examples: (texto con ejemplos), feedback: (retroalimentación constructiva)}\n\
- plagiarism_detected: (booleano true/false)\n\
- plagiarism_evidence: (texto explicando evidencia de plagio si se detectó)\n\
- response_time_analysis: (texto analizando si los tiempos de respuesta son consistentes con el contenido)\n\
- summary: (Un breve resumen de la evaluación)",
    fallback: FallbackText {
        not_available: "No disponible",
        format_error: "Error de formato de evaluación",
        plagiarism_unavailable: "No se pudo evaluar el plagio debido a un error en el formato",
        response_time_unavailable: "No se pudo analizar los tiempos de respuesta debido a un error en el formato",
        summary_error: "Hubo un error en el formato de los resultados de la evaluación.",
    },

    report_system: "Eres un experto generador de informes educativos. \
Tu tarea es crear informes claros, completos y constructivos basados en evaluaciones de estudiantes. \
Concéntrate en proporcionar retroalimentación procesable que ayude al estudiante a mejorar. \
Incluye análisis detallado sobre la originalidad del trabajo, la evidencia de posible plagio, \
y cómo los tiempos de respuesta se relacionan con la calidad y autenticidad del trabajo.",
    report_user: "Datos de evaluación:\n{evaluation_json}\n\n\
Genera un informe de evaluación educativa completo con las siguientes secciones:\n\
1. Resumen ejecutivo - Breve descripción de fortalezas y áreas de mejora\n\
2. Evaluación de objetivos de aprendizaje - Evaluación detallada para cada objetivo\n\
3. Análisis de comprensión - Evaluación de la comprensión conceptual\n\
4. Evaluación de autenticidad - Evaluación de originalidad y compromiso personal\n\
5. Análisis de habilidades relacionales - Evaluación de cómo el estudiante conecta ideas\n\
6. Evaluación de argumentación - Calidad de la estructura y fundamentación de argumentos\n\
7. Uso de bibliografía - Evaluación de referencias y fuentes utilizadas\n\
8. Análisis de tiempos de respuesta - Coherencia entre tiempo y calidad de respuestas\n\
9. Detección de plagio - Hallazgos sobre posible contenido no original\n\
10. Calidad general - Evaluación general del trabajo\n\
11. Recomendaciones - Sugerencias específicas y procesables para mejorar\n\n\
El informe debe ser profesional pero alentador. Usa ejemplos específicos del trabajo y las respuestas del estudiante.",
    report_failed: "Error generando el informe.",
};
