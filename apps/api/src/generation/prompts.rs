// All prompt templates for résumé generation.
// Placeholders are `{name}` tokens replaced by `prompt_builder::build_prompt`.

/// Fabricate a complete résumé.
/// Replace: {department}, {sub_department}, {experience}, {seed}, {name_hint},
///          {json_only_instruction}
pub const FABRICATE_PROMPT_TEMPLATE: &str = r#"Generate a detailed professional resume for a candidate with the following profile:

Department: {department}
Sub-Department: {sub_department}
Years of Experience: {experience}
Unique Identifier: {seed}
Name must start with letter: {name_hint}

CRITICAL REQUIREMENTS:
1. MUST use a COMPLETELY DIFFERENT name starting with the letter "{name_hint}"
2. MUST use DIFFERENT companies than previous resumes
3. MUST use DIFFERENT universities
4. Generate UNIQUE and DIVERSE content - no repetition

Create a complete resume with the following sections in JSON format:
1. Full Name (MUST start with "{name_hint}" - be creative with first and last names)
2. Professional Summary (3-4 sentences, unique achievements)
3. Skills (8-12 relevant technical and soft skills)
4. Work Experience (2-3 positions with DIFFERENT company names, job titles, dates, and 4-5 bullet points each)
5. Education (degree, DIFFERENT university name, graduation year)
6. Certifications (2-3 relevant certifications)

{json_only_instruction} Use this structure:
{
    "name": "Full Name starting with {name_hint}",
    "summary": "Professional summary text",
    "skills": ["skill1", "skill2", ...],
    "experience": [
        {
            "title": "Job Title",
            "company": "Company Name",
            "duration": "Start Date - End Date",
            "responsibilities": ["resp1", "resp2", ...]
        }
    ],
    "education": {
        "degree": "Degree Name",
        "university": "University Name",
        "year": "Year"
    },
    "certifications": ["cert1", "cert2", ...]
}

Make it realistic and professional for the specified department and experience level."#;

/// Structure the plain text of an uploaded résumé.
/// Replace: {resume_text}, {json_only_instruction}
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract all information from this resume and structure it in JSON format.

Resume Text:
{resume_text}

Extract the following information using this structure:
{
    "name": "Full Name",
    "email": "email@example.com",
    "phone": "phone number",
    "summary": "Professional summary or objective",
    "skills": ["skill1", "skill2", ...],
    "experience": [
        {
            "title": "Job Title",
            "company": "Company Name",
            "duration": "Start Date - End Date",
            "responsibilities": ["responsibility1", "responsibility2", ...]
        }
    ],
    "education": [
        {
            "degree": "Degree Name",
            "university": "University Name",
            "year": "Graduation Year",
            "details": "Additional details if any"
        }
    ],
    "projects": [
        {
            "name": "Project Name",
            "description": "Project Description",
            "technologies": ["tech1", "tech2", ...],
            "duration": "Duration or Date"
        }
    ],
    "certifications": ["cert1", "cert2", ...]
}

If any section is not found, use an empty array [] or empty string "". {json_only_instruction}"#;

/// Rewrite an extracted résumé against job requirements.
/// Replace: {extracted_resume}, {job_requirements}, {json_only_instruction}
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Optimize this resume based on the job requirements.

Current Resume Data:
{extracted_resume}

Job Requirements:
{job_requirements}

CRITICAL RULES:
1. Keep Education section EXACTLY as is - DO NOT modify
2. Keep Projects section EXACTLY as is - DO NOT modify
3. Keep Name, Email, Phone EXACTLY as is - DO NOT modify
4. You CAN modify:
   - Professional Summary (tailor to job requirements)
   - Skills (reorder and highlight relevant skills, add missing relevant skills)
   - Work Experience (rewrite descriptions to match job requirements, use action verbs and metrics)
   - Certifications (reorder by relevance, suggest relevant ones if needed)

Generate an optimized resume that:
- Highlights relevant experience matching the job requirements
- Uses keywords from the job description
- Quantifies achievements where possible
- Uses strong action verbs
- Maintains professional tone
- Keeps all education and project information unchanged

{json_only_instruction} Keep the same structure as the input, with optimized content."#;
