// ABOUTME: The built-in Hire-me-nator agent tree: root orchestrator, domain specialists and search helpers.
// ABOUTME: build_catalog assembles and validates the registry used by the dispatcher.

mod prompts;

use crate::agent::{AgentKind, AgentSpec, ToolRef};
use crate::registry::{AgentRegistry, RegistryError};
use crate::schema::OutputSchema;

/// Name of the root orchestrator.
pub const ROOT_AGENT: &str = "hiremenator";

/// One domain specialist together with its paired search helper.
struct Pairing {
    agent: &'static str,
    description: &'static str,
    instruction: &'static str,
    output_key: &'static str,
    schema: fn() -> OutputSchema,
    helper: &'static str,
    helper_description: &'static str,
    helper_instruction: &'static str,
    helper_output_key: &'static str,
}

const PAIRINGS: &[Pairing] = &[
    Pairing {
        agent: "cv_agent",
        description: "Creates, analyses and improves CVs through conversation, uploads or interactive editing.",
        instruction: prompts::CV_AGENT,
        output_key: "cvdata",
        schema: general_schema,
        helper: "googlecv",
        helper_description: "Structures CV content and enriches vague entries with professional phrasing from the web.",
        helper_instruction: prompts::GOOGLE_CV,
        helper_output_key: "googlecvdata",
    },
    Pairing {
        agent: "domain_agent",
        description: "Maps a CV to the best-fitting career domains, performs a gap analysis and recommends an action plan.",
        instruction: prompts::DOMAIN_AGENT,
        output_key: "domaindata",
        schema: domain_schema,
        helper: "googledomain",
        helper_description: "Researches role expectations, tools, certifications and trends for career domains.",
        helper_instruction: prompts::GOOGLE_DOMAIN,
        helper_output_key: "googledomaindata",
    },
    Pairing {
        agent: "job_search_agent",
        description: "Finds jobs, internships, fellowships, freelance gigs and projects matching the user's profile.",
        instruction: prompts::JOB_SEARCH_AGENT,
        output_key: "jobsearchdata",
        schema: response_schema,
        helper: "googlejobsearch",
        helper_description: "Runs site-scoped searches on job boards and career pages and extracts listings.",
        helper_instruction: prompts::GOOGLE_JOB_SEARCH,
        helper_output_key: "googlejobsearchdata",
    },
    Pairing {
        agent: "job_analysis_agent",
        description: "Compares a job description with the user's CV and produces a fit report and preparation plan.",
        instruction: prompts::JOB_ANALYSIS_AGENT,
        output_key: "jobanalysisdata",
        schema: response_schema,
        helper: "googlejobanalysis",
        helper_description: "Researches skills, tools, experience and salary expectations for a role.",
        helper_instruction: prompts::GOOGLE_JOB_ANALYSIS,
        helper_output_key: "googlejobanaysisdata",
    },
    Pairing {
        agent: "company_research_agent",
        description: "Researches a company's history, culture, leadership, market standing and competitors.",
        instruction: prompts::COMPANY_RESEARCH_AGENT,
        output_key: "jobresearchdata",
        schema: response_schema,
        helper: "googlecompanyresearch",
        helper_description: "Gathers company overviews, news, reviews, filings and competitor data.",
        helper_instruction: prompts::GOOGLE_COMPANY_RESEARCH,
        helper_output_key: "googlecompanyresearchdata",
    },
    Pairing {
        agent: "resume_agent",
        description: "Tailors the user's resume to a specific job description and company.",
        instruction: prompts::RESUME_AGENT,
        output_key: "resumedata",
        schema: resume_schema,
        helper: "googleresume",
        helper_description: "Finds role phrasing, company values and resume examples grounded in the user's experience.",
        helper_instruction: prompts::GOOGLE_RESUME,
        helper_output_key: "googleresumedata",
    },
    Pairing {
        agent: "ats_agent",
        description: "Checks and improves a resume's compatibility with applicant tracking systems.",
        instruction: prompts::ATS_AGENT,
        output_key: "atsdata",
        schema: resume_schema,
        helper: "googleats",
        helper_description: "Researches ATS templates, keywords and formatting rules for a role and industry.",
        helper_instruction: prompts::GOOGLE_ATS,
        helper_output_key: "googleatsdata",
    },
    Pairing {
        agent: "interview_agent",
        description: "Prepares the user for interviews with question packs, model answers and mock sessions.",
        instruction: prompts::INTERVIEW_AGENT,
        output_key: "interviewdata",
        schema: resume_schema,
        helper: "googleinterview",
        helper_description: "Researches interview formats, reported questions and candidate experiences.",
        helper_instruction: prompts::GOOGLE_INTERVIEW,
        helper_output_key: "googleinterviewdata",
    },
    Pairing {
        agent: "offer_letter_agent",
        description: "Explains offer letters, flags risky clauses and suggests negotiation tactics.",
        instruction: prompts::OFFER_LETTER_AGENT,
        output_key: "offerletterdata",
        schema: resume_schema,
        helper: "googleofferletter",
        helper_description: "Benchmarks compensation and benefits and explains contract clauses.",
        helper_instruction: prompts::GOOGLE_OFFER_LETTER,
        helper_output_key: "googleofferletterdata",
    },
    Pairing {
        agent: "network_agent",
        description: "Finds professionals, communities and events and drafts outreach messages.",
        instruction: prompts::NETWORK_AGENT,
        output_key: "networkdata",
        schema: markdown_schema,
        helper: "googlenetwork",
        helper_description: "Finds public profiles, communities and events for a domain or company.",
        helper_instruction: prompts::GOOGLE_NETWORK,
        helper_output_key: "googlenetworkdata",
    },
    Pairing {
        agent: "news_agent",
        description: "Curates career news, internships, exams and scholarships for the user's domain.",
        instruction: prompts::NEWS_AGENT,
        output_key: "newsdata",
        schema: markdown_schema,
        helper: "googlenews",
        helper_description: "Searches recent news, opportunities and competitions on requested topics.",
        helper_instruction: prompts::GOOGLE_NEWS,
        helper_output_key: "googlenewsdata",
    },
    Pairing {
        agent: "career_advisor_agent",
        description: "Builds long-term career roadmaps, pivots and upskilling plans.",
        instruction: prompts::CAREER_ADVISOR_AGENT,
        output_key: "careeradvisordata",
        schema: resume_schema,
        helper: "googlecareeradvisor",
        helper_description: "Researches market trends, emerging roles and transition paths.",
        helper_instruction: prompts::GOOGLE_CAREER_ADVISOR,
        helper_output_key: "googlecareeradvisordata",
    },
    Pairing {
        agent: "portfolio_pitch_agent",
        description: "Strengthens personal branding: bios, pitches, outreach emails and project showcases.",
        instruction: prompts::PORTFOLIO_PITCH_AGENT,
        output_key: "portfoliopitchdata",
        schema: resume_schema,
        helper: "googleportfoliopitch",
        helper_description: "Finds strong bios, pitches and portfolio structures for the user's domain.",
        helper_instruction: prompts::GOOGLE_PORTFOLIO_PITCH,
        helper_output_key: "googleportfoliopitchdata",
    },
];

/// Build and validate the full agent tree, with every agent on `model`.
pub fn build_catalog(model: &str) -> Result<AgentRegistry, RegistryError> {
    let mut registry = AgentRegistry::new();

    let mut root = AgentSpec::new(ROOT_AGENT, AgentKind::Root)
        .model(model)
        .description(
            "Central orchestrator of Hire-me-nator. Interprets the user's goal, presents a plan \
             and delegates to the specialist agents.",
        )
        .instruction(prompts::ROOT)
        .output_key("hiremenatordata")
        .output_schema(general_schema());
    for pairing in PAIRINGS {
        root = root.tool(ToolRef::agent(pairing.agent));
    }
    registry.register(root)?;

    for pairing in PAIRINGS {
        registry.register(
            AgentSpec::new(pairing.agent, AgentKind::Domain)
                .model(model)
                .description(pairing.description)
                .instruction(format!("{}{}", pairing.instruction, prompts::DOMAIN_RULES))
                .tool(ToolRef::Search)
                .tool(ToolRef::agent(pairing.helper))
                .output_key(pairing.output_key)
                .output_schema((pairing.schema)()),
        )?;
    }

    for pairing in PAIRINGS {
        let schema = if pairing.helper == "googleats" {
            resume_schema()
        } else {
            general_schema()
        };
        registry.register(
            AgentSpec::new(pairing.helper, AgentKind::Tool)
                .model(model)
                .description(pairing.helper_description)
                .instruction(format!(
                    "{}{}",
                    pairing.helper_instruction,
                    prompts::TOOL_RULES
                ))
                .tool(ToolRef::Search)
                .output_key(pairing.helper_output_key)
                .output_schema(schema),
        )?;
    }

    registry.validate()?;
    tracing::info!(agents = registry.len(), model, "agent catalog built");
    Ok(registry)
}

fn general_schema() -> OutputSchema {
    OutputSchema::new("generalschema")
        .field("acknowledgment", "Short acknowledgment of what the user asked for")
        .field("response", "The main answer")
        .field("plan", "Steps that will be taken next")
        .field("features", "Capabilities relevant to the request")
        .field("delegation", "Which agent or tool handled or will handle the request")
        .field("comment", "Anything else worth sharing with the user")
}

fn domain_schema() -> OutputSchema {
    OutputSchema::new("domainschema")
        .field("response_to_user", "Conversational summary of the findings")
        .field("suggested_domains", "Ranked career domains with the reason for each")
        .field("cvskill_analysis", "Markdown gap analysis of skills, tools and projects")
}

fn response_schema() -> OutputSchema {
    OutputSchema::new("responseschema").field("response", "The full markdown answer")
}

fn resume_schema() -> OutputSchema {
    OutputSchema::new("resumeschema")
        .field("response_to_user", "Short message confirming what was produced and the next steps")
        .field("generated_resume_markdown", "The generated document in markdown")
}

fn markdown_schema() -> OutputSchema {
    OutputSchema::new("markdownschema")
        .field("response_to_user", "Short message confirming what was produced and the next steps")
        .field("generated_markdown", "The generated content in markdown")
}
