//! Wire shapes for the Gemini `generateContent` call.

use serde::{Deserialize, Serialize};

use crate::domain::CompletionRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequestDto<'a> {
    contents: [ContentDto<'a>; 1],
    system_instruction: InstructionDto<'a>,
    generation_config: GenerationConfigDto,
}

#[derive(Debug, Serialize)]
struct ContentDto<'a> {
    role: &'static str,
    parts: [PartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
struct InstructionDto<'a> {
    parts: [PartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
struct PartDto<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfigDto {
    temperature: f32,
}

impl<'a> From<&'a CompletionRequest> for GenerateContentRequestDto<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            contents: [ContentDto {
                role: "user",
                parts: [PartDto {
                    text: &request.prompt,
                }],
            }],
            system_instruction: InstructionDto {
                parts: [PartDto {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfigDto {
                temperature: request.profile.temperature(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<ResponsePartDto>,
}

#[derive(Debug, Deserialize)]
struct ResponsePartDto {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponseDto {
    /// Text of the first candidate; empty when the model returned none
    /// (for example when the prompt was blocked).
    pub(super) fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
