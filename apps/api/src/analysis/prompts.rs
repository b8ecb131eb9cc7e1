// All LLM prompt templates for the analysis module.
// Builders are pure: arguments are interpolated verbatim, never validated or escaped.
// Fixed placeholders are substituted before user text so user text is never re-scanned.

use serde::{Deserialize, Serialize};

/// Every generated question set targets this many items.
pub const QUESTION_COUNT: u32 = 20;

/// Which question template to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Technical round, multiple choice.
    Mcq,
    /// Technical round, coding challenges.
    Coding,
    /// Interview round.
    Interview,
}

/// Preamble for resume analysis. The resume text is appended directly after it.
pub const ANALYSIS_PROMPT_PREAMBLE: &str = "\
You are an expert resume analyst. Analyze the following resume text and provide the following:

1. A brief summary of the resume, including the candidate's main interests and the fields they are most passionate about.
2. A detailed percentage distribution of fields/domains present in the resume, with keywords extracted from the resume. Ensure the total sums up to 100%.
3. An overall explanation for each domain in brief according to the resume.
Here is an example of how the output should look like:

### Summary
The resume indicates a strong background and interest in machine learning, data science, and software development. The candidate has worked on several projects involving machine learning algorithms, data preprocessing, and building software applications. They have demonstrated proficiency in Python, Java, and various machine learning frameworks. The candidate is passionate about solving complex problems using AI and has a keen interest in continuing to develop their skills in this area.

### Percentage Distribution of Fields/Domains
Note: only include standard technologies as keywords.
- *Machine Learning (ML)*: 40%
  - Keywords: Algorithms, Keras, PyTorch, Scikit-Learn, Predictive Models
- *Data Science (DS)*: 30%
  - Keywords: Data Analysis, Pandas, NumPy, Visualization, Statistical Methods
- *Software Development (SD)*: 30%
  - Keywords: Python, Java, Software Engineering, APIs, Git
";

/// Title the match report must carry.
pub const MATCH_REPORT_TITLE: &str = "ATS Resume Evaluation";

/// ATS match template. Replace `{title}`, `{job_description}`, `{resume_text}`.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"You are an experienced Applicant Tracking System (ATS) scanner and technical recruiter with deep knowledge of software engineering, data science, data analysis, and related hiring. Evaluate the resume below against the job description.

Title the response exactly "{title}" and present these sections in this exact order:
1. Match Percentage: a single whole-number percentage, written on one line as "Match Percentage: NN%"
2. Missing Keywords: the important keywords from the job description that do not appear in the resume
3. Summary Judgment: a short verdict on how well the candidate fits the role
4. Recommendations: concrete changes that would raise the match

Be consistent: the same resume and the same job description must always produce the same percentage and the same findings.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

/// Domain extraction template. Replace `{analysis}`.
pub const DOMAIN_EXTRACTION_PROMPT_TEMPLATE: &str = "\
Based on the following resume analysis, extract and return the standard domain/field/keywords names present in the resume. \
Provide only the domain names separated by commas:

{analysis}";

/// MCQ template. Replace `{count}`, `{domain}`.
pub const MCQ_PROMPT_TEMPLATE: &str = "\
*Subject:* {domain}

*Bloom Taxonomy Levels:*

- *Analysis:* Identify the relationships between concepts, analyze data, identify patterns and causes, and draw conclusions.
- *Apply:* Use learned concepts to solve problems, complete tasks, and apply principles to new situations.
- *Evaluate:* Assess the value or quality of something, make judgments, and justify decisions.

*MCQ Prompt:*

Generate {count} code snippet types of multiple-choice questions (MCQs) for the subject of {domain} aligned with the following Bloom Taxonomy levels:

- 8 questions at the *Analysis* level:
- 6 questions at the *Apply* level:
- 6 questions at the *Evaluate* level:

*Format:*

- Each question should have 4 options (A, B, C, D)
- Each question should have a clear and concise stem
- Each option should be plausible, but only one should be correct

Example:

1. What is the time complexity of sorting an array using the merge sort algorithm? (Multiple-choice)
a. O(n)
b. O(log n)
c. O(n log n)
d. O(n^2)

Answers:

1. c

Note: Ensure there are exactly {count} questions in total with a random mix of question types.";

/// Coding challenge template. Replace `{count}`, `{domain}`, `{analysis}`.
pub const CODING_PROMPT_TEMPLATE: &str = "\
You are an expert in the {domain} field. Based on the analysis of the candidate's resume, which shows {analysis}, \
generate {count} coding challenges that reflect fundamental to medium-level real-world scenarios and problems encountered in {domain}. \
The coding challenges should:

1. Be relevant to what a recruiter might ask a final-year student.
2. Focus on practical coding tasks.
3. Include identifying errors, completing code snippets, and writing simple to moderate algorithms.
4. Cover a range of difficulty levels from fundamental concepts to medium topics.
5. Be clear, concise, and directly related to the skills highlighted in the resume.
6. Include examples of typical coding questions.

Example:

1. Write a function to reverse a string. (Coding challenge)
```python
def reverse_string(s):
    return s[::-1]
```

2. Identify the error in the following code snippet and correct it. (Open-ended)
```python
def sum_of_squares(n):
    total = 0
    for i in range(n):
        total += i**2
    return total
```
Error: The range should be `range(n+1)` to include `n`.

3. Complete the following function to check if a number is prime. (Fill-in-the-blank)
```python
def is_prime(n):
    if n <= 1:
        return False
    for i in range(2, n):
        if n % i == 0:
            return False
    return True
```

Ensure there are exactly {count} coding questions with a mix of the above types.";

/// Interview template. Replace `{count}`, `{domain}`, `{analysis}`.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = "\
Based on the candidate's resume {analysis} and the identified skills, experience, and education, generate a set of {count} interview questions \
that assess their fit for the position at our company. The questions should cover topics such as problem-solving abilities, leadership skills, \
communication skills, cultural fit, etc. Additionally, include follow-up questions to probe deeper into the candidate's responses and evaluate their thought process. \
Note: The questions should be specific to the field of {domain}. \
Questions should be both knowledge base and industry application level also which include practical application of knowledge but only based on {domain}. \
You need to take reference from the resume analysis but the questions generated should be strictly based on {domain}.";

/// Title the rephrased text must carry.
pub const REPHRASE_TITLE: &str = "ATS-Optimized Version";

/// Rephrase template. Replace `{title}`, `{text}`.
pub const REPHRASE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer who specializes in Applicant Tracking System (ATS) optimization. Rewrite the text below so that it follows ATS conventions: begin statements with strong action verbs, quantify impact where the text supports it, use standard section vocabulary and industry keywords, and remove tables, symbols, and decorative formatting. Do not invent facts that are not present in the original text.

Title the response "{title}" and return only the rewritten text under that title.

TEXT:
{text}"#;

pub fn build_analysis_prompt(resume_text: &str) -> String {
    format!("{ANALYSIS_PROMPT_PREAMBLE}{resume_text}")
}

pub fn build_match_prompt(resume_text: &str, job_description: &str) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{title}", MATCH_REPORT_TITLE)
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}

pub fn build_domain_extraction_prompt(analysis: &str) -> String {
    DOMAIN_EXTRACTION_PROMPT_TEMPLATE.replace("{analysis}", analysis)
}

/// The MCQ template is driven by the domain alone; the other two also embed the analysis.
pub fn build_question_prompt(analysis: &str, domain: &str, question_type: QuestionType) -> String {
    let template = match question_type {
        QuestionType::Mcq => MCQ_PROMPT_TEMPLATE,
        QuestionType::Coding => CODING_PROMPT_TEMPLATE,
        QuestionType::Interview => INTERVIEW_PROMPT_TEMPLATE,
    };
    template
        .replace("{count}", &QUESTION_COUNT.to_string())
        .replace("{domain}", domain)
        .replace("{analysis}", analysis)
}

pub fn build_rephrase_prompt(text: &str) -> String {
    REPHRASE_PROMPT_TEMPLATE
        .replace("{title}", REPHRASE_TITLE)
        .replace("{text}", text)
}
