//! Book service - Long-form audiobook generation
//!
//! Derives a topic from the conversation, optionally derives a table of
//! contents, generates chapter text per entry, synthesizes each chapter and
//! assembles the clips into one audio file. Every step is fail-fast: the
//! first error aborts the pipeline.

use std::{fmt, sync::Arc};

use domain::{BookId, BookLength, ChatMessage};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{InferencePort, MediaStorePort, SpeechPort};

/// Result of a book generation run
#[derive(Debug, Clone)]
pub struct GeneratedBook {
    /// Name of the merged audio file
    pub filename: String,
    /// Identifier the file is namespaced under
    pub book_id: BookId,
    /// Number of chapters that were generated
    pub chapter_count: usize,
}

/// Service for generating audiobooks from a conversation
pub struct BookService {
    inference: Arc<dyn InferencePort>,
    speech: Arc<dyn SpeechPort>,
    media_store: Arc<dyn MediaStorePort>,
    toc_prompt: String,
    synthesis_concurrency: usize,
}

impl fmt::Debug for BookService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookService")
            .field("synthesis_concurrency", &self.synthesis_concurrency)
            .finish_non_exhaustive()
    }
}

impl BookService {
    /// Create a new book service
    ///
    /// `synthesis_concurrency` bounds how many chapters are synthesized at
    /// once; 1 means strictly sequential. Chapter order is preserved either
    /// way.
    pub fn new(
        inference: Arc<dyn InferencePort>,
        speech: Arc<dyn SpeechPort>,
        media_store: Arc<dyn MediaStorePort>,
        toc_prompt: impl Into<String>,
        synthesis_concurrency: usize,
    ) -> Self {
        Self {
            inference,
            speech,
            media_store,
            toc_prompt: toc_prompt.into(),
            synthesis_concurrency: synthesis_concurrency.max(1),
        }
    }

    /// Generate a complete audiobook
    ///
    /// `messages` is the serialized conversation history the topic is
    /// derived from.
    #[instrument(skip(self, messages), fields(length = length.minutes()))]
    pub async fn generate(
        &self,
        messages: &str,
        length: BookLength,
    ) -> Result<GeneratedBook, ApplicationError> {
        let topic = self.derive_topic(messages).await?;
        info!(topic = %topic, "Derived book topic");

        let chapters = if length.uses_table_of_contents() {
            let titles = self
                .request_table_of_contents(&topic, length.chapter_count())
                .await?;
            debug!(titles = titles.len(), "Table of contents derived");

            let mut chapters = Vec::with_capacity(titles.len());
            for title in &titles {
                let text = self.generate_chapter(title, Some(&titles)).await?;
                chapters.push(format!("{text}\n\n"));
            }
            chapters
        } else {
            vec![self.generate_chapter(&topic, None).await?]
        };

        let book_id = BookId::generate();
        let chapter_count = chapters.len();

        // Bounded, order-preserving synthesis
        let requests: Vec<_> = chapters
            .iter()
            .map(|text| self.speech.synthesize(text.as_str()))
            .collect();
        let synthesized: Vec<_> = stream::iter(requests)
            .buffered(self.synthesis_concurrency)
            .try_collect()
            .await?;

        for (index, synthesis) in synthesized.into_iter().enumerate() {
            if let Err(e) = self
                .media_store
                .store_chapter(&book_id, index, synthesis.audio_data)
                .await
            {
                self.discard_scratch(&book_id, chapter_count).await;
                return Err(e);
            }
        }

        let filename = match self.media_store.merge_chapters(&book_id, chapter_count).await {
            Ok(filename) => filename,
            Err(e) => {
                self.discard_scratch(&book_id, chapter_count).await;
                return Err(e);
            },
        };

        info!(book_id = %book_id, chapters = chapter_count, file = %filename, "Book generated");

        Ok(GeneratedBook {
            filename,
            book_id,
            chapter_count,
        })
    }

    /// Remove scratch chapter files left behind by a failed run
    ///
    /// Scratch files carry no removal deadline, so an aborted pipeline must
    /// reclaim them itself. Best effort: the original error is what the
    /// caller sees.
    async fn discard_scratch(&self, book_id: &BookId, chapter_count: usize) {
        if let Err(e) = self
            .media_store
            .discard_chapters(book_id, chapter_count)
            .await
        {
            warn!(book_id = %book_id, error = %e, "Failed to discard scratch chapters");
        }
    }

    /// Summarize the conversation into a single topic
    async fn derive_topic(&self, messages: &str) -> Result<String, ApplicationError> {
        let prompt = format!(
            "Please extract the summarized topic the user wants from the below \
             chatting history.\n\nchat_history: {messages}"
        );
        let result = self
            .inference
            .generate(&[ChatMessage::system(prompt)])
            .await?;
        Ok(result.content)
    }

    /// Ask the model for an ordered list of chapter titles
    async fn request_table_of_contents(
        &self,
        topic: &str,
        chapter_count: usize,
    ) -> Result<Vec<String>, ApplicationError> {
        let prompt = format!(
            "{}topic: {topic}\n\nchapter counts: {chapter_count}",
            self.toc_prompt
        );
        let messages = vec![
            ChatMessage::system(prompt),
            ChatMessage::user("Please generate the table of contents"),
        ];

        let value = self.inference.generate_json(&messages).await?;

        let entries = value
            .get("contents")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| {
                ApplicationError::MalformedModelOutput(
                    "table of contents is missing a 'contents' array".to_string(),
                )
            })?;

        if entries.is_empty() {
            return Err(ApplicationError::MalformedModelOutput(
                "table of contents is empty".to_string(),
            ));
        }

        entries
            .iter()
            .map(|entry| {
                entry.as_str().map(String::from).ok_or_else(|| {
                    ApplicationError::MalformedModelOutput(
                        "table of contents entry is not a string".to_string(),
                    )
                })
            })
            .collect()
    }

    /// Generate one chapter's text
    ///
    /// With a table of contents the model is instructed to open the text
    /// with "Chapter [number]. [title]".
    async fn generate_chapter(
        &self,
        topic: &str,
        table_of_contents: Option<&[String]>,
    ) -> Result<String, ApplicationError> {
        let prompt = match table_of_contents {
            Some(titles) => {
                let toc_json = serde_json::to_string(titles)
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                format!(
                    "Please generate the text involving approximately 450 words for the \
                     below topic. It will be one of the chapters for the book. You can \
                     refer the below table of contents. Chapter numbers and titles should \
                     be written at the beginning of the text, like this:\n\
                     \"Chapter [number]. [title]\"\n\
                     You should start the text like this format.\n\n\
                     topic: {topic}\n\ntable of contents: {toc_json}"
                )
            },
            None => format!(
                "Please generate the text involving approximately 450 words for the \
                 below topic.\ntopic: {topic}"
            ),
        };

        let result = self
            .inference
            .generate(&[ChatMessage::system(prompt)])
            .await?;
        Ok(result.content)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domain::AudioFormat;
    use mockall::mock;

    use super::*;
    use crate::ports::{InferenceResult, SynthesisResult, TranscriptionResult};

    mock! {
        pub Inference {}

        #[async_trait::async_trait]
        impl InferencePort for Inference {
            async fn generate(&self, messages: &[ChatMessage]) -> Result<InferenceResult, ApplicationError>;
            async fn generate_json(&self, messages: &[ChatMessage]) -> Result<serde_json::Value, ApplicationError>;
            async fn is_healthy(&self) -> bool;
            fn current_model(&self) -> String;
        }
    }

    mock! {
        pub Speech {}

        #[async_trait::async_trait]
        impl SpeechPort for Speech {
            async fn transcribe(&self, audio_data: Vec<u8>, format: AudioFormat) -> Result<TranscriptionResult, ApplicationError>;
            async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError>;
            async fn is_available(&self) -> bool;
        }
    }

    mock! {
        pub MediaStore {}

        #[async_trait::async_trait]
        impl MediaStorePort for MediaStore {
            async fn store_chapter(&self, book_id: &BookId, index: usize, audio: Vec<u8>) -> Result<(), ApplicationError>;
            async fn merge_chapters(&self, book_id: &BookId, chapter_count: usize) -> Result<String, ApplicationError>;
            async fn discard_chapters(&self, book_id: &BookId, chapter_count: usize) -> Result<(), ApplicationError>;
            async fn schedule_removal(&self, filename: &str) -> Result<(), ApplicationError>;
        }
    }

    const TOC_PROMPT: &str = "Generate a JSON table of contents with a 'contents' array.\n\n";

    fn text_result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "test-model".to_string(),
            tokens_used: Some(100),
            latency_ms: 50,
        }
    }

    fn audio_result() -> SynthesisResult {
        SynthesisResult {
            audio_data: vec![0u8; 64],
            format: AudioFormat::Mp3,
        }
    }

    fn service(
        inference: MockInference,
        speech: MockSpeech,
        media_store: MockMediaStore,
    ) -> BookService {
        BookService::new(
            Arc::new(inference),
            Arc::new(speech),
            Arc::new(media_store),
            TOC_PROMPT,
            1,
        )
    }

    fn expect_merge(media_store: &mut MockMediaStore, expected_count: usize) {
        media_store
            .expect_merge_chapters()
            .withf(move |_, count| *count == expected_count)
            .returning(|book_id, _| Ok(book_id.merged_filename()));
    }

    #[tokio::test]
    async fn three_minute_book_has_one_chapter_and_no_toc() {
        let mut inference = MockInference::new();
        // First call derives the topic, second generates the only chapter
        inference
            .expect_generate()
            .times(2)
            .returning(|_| Ok(text_result("Sailing the Atlantic")));
        inference.expect_generate_json().never();

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().times(1).returning(|_| Ok(audio_result()));

        let mut media_store = MockMediaStore::new();
        media_store
            .expect_store_chapter()
            .withf(|_, index, _| *index == 0)
            .times(1)
            .returning(|_, _, _| Ok(()));
        expect_merge(&mut media_store, 1);

        let book = service(inference, speech, media_store)
            .generate("[]", BookLength::Minutes3)
            .await
            .unwrap();

        assert_eq!(book.chapter_count, 1);
        assert!(book.filename.ends_with("_final.mp3"));
    }

    #[tokio::test]
    async fn ten_minute_book_requests_three_chapters_in_toc_order() {
        let chapter_prompts = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&chapter_prompts);

        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(4) // topic + 3 chapters
            .returning(move |messages| {
                seen.lock().unwrap().push(messages[0].content.clone());
                Ok(text_result("chapter text"))
            });
        inference
            .expect_generate_json()
            .withf(|messages: &[ChatMessage]| {
                messages[0].content.contains("chapter counts: 3")
                    && messages[1].content == "Please generate the table of contents"
            })
            .times(1)
            .returning(|_| {
                Ok(serde_json::json!({
                    "contents": ["The Departure", "The Storm", "The Landfall"]
                }))
            });

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().times(3).returning(|_| Ok(audio_result()));

        let stored = Arc::new(Mutex::new(Vec::new()));
        let stored_clone = Arc::clone(&stored);
        let mut media_store = MockMediaStore::new();
        media_store
            .expect_store_chapter()
            .times(3)
            .returning(move |_, index, _| {
                stored_clone.lock().unwrap().push(index);
                Ok(())
            });
        expect_merge(&mut media_store, 3);

        let book = service(inference, speech, media_store)
            .generate("[]", BookLength::Minutes10)
            .await
            .unwrap();

        assert_eq!(book.chapter_count, 3);
        assert_eq!(*stored.lock().unwrap(), vec![0, 1, 2]);

        // Chapter prompts follow the table of contents order (after the topic prompt)
        let prompts = chapter_prompts.lock().unwrap();
        assert!(prompts[1].contains("topic: The Departure"));
        assert!(prompts[2].contains("topic: The Storm"));
        assert!(prompts[3].contains("topic: The Landfall"));
        assert!(prompts[1].contains("Chapter [number]. [title]"));
    }

    #[tokio::test]
    async fn thirty_minute_book_requests_ten_chapters() {
        let titles: Vec<String> = (1..=10).map(|i| format!("Part {i}")).collect();
        let toc = serde_json::json!({ "contents": titles });

        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(11) // topic + 10 chapters
            .returning(|_| Ok(text_result("text")));
        inference
            .expect_generate_json()
            .withf(|messages: &[ChatMessage]| messages[0].content.contains("chapter counts: 10"))
            .times(1)
            .returning(move |_| Ok(toc.clone()));

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().times(10).returning(|_| Ok(audio_result()));

        let mut media_store = MockMediaStore::new();
        media_store
            .expect_store_chapter()
            .times(10)
            .returning(|_, _, _| Ok(()));
        expect_merge(&mut media_store, 10);

        let book = service(inference, speech, media_store)
            .generate("[]", BookLength::Minutes30)
            .await
            .unwrap();

        assert_eq!(book.chapter_count, 10);
    }

    #[tokio::test]
    async fn toc_without_contents_array_is_malformed_output() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(1)
            .returning(|_| Ok(text_result("topic")));
        inference
            .expect_generate_json()
            .returning(|_| Ok(serde_json::json!({ "chapters": ["A"] })));

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().never();

        let result = service(inference, speech, MockMediaStore::new())
            .generate("[]", BookLength::Minutes10)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::MalformedModelOutput(_))
        ));
    }

    #[tokio::test]
    async fn toc_with_non_string_entries_is_malformed_output() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(1)
            .returning(|_| Ok(text_result("topic")));
        inference
            .expect_generate_json()
            .returning(|_| Ok(serde_json::json!({ "contents": [1, 2, 3] })));

        let result = service(inference, MockSpeech::new(), MockMediaStore::new())
            .generate("[]", BookLength::Minutes10)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::MalformedModelOutput(_))
        ));
    }

    #[tokio::test]
    async fn empty_toc_is_malformed_output() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(1)
            .returning(|_| Ok(text_result("topic")));
        inference
            .expect_generate_json()
            .returning(|_| Ok(serde_json::json!({ "contents": [] })));

        let result = service(inference, MockSpeech::new(), MockMediaStore::new())
            .generate("[]", BookLength::Minutes10)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::MalformedModelOutput(_))
        ));
    }

    #[tokio::test]
    async fn topic_failure_aborts_before_any_synthesis() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .returning(|_| Err(ApplicationError::Inference("model offline".to_string())));
        inference.expect_generate_json().never();

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().never();

        let result = service(inference, speech, MockMediaStore::new())
            .generate("[]", BookLength::Minutes3)
            .await;

        assert!(matches!(result, Err(ApplicationError::Inference(_))));
    }

    #[tokio::test]
    async fn synthesis_failure_aborts_before_merge() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(2)
            .returning(|_| Ok(text_result("text")));

        let mut speech = MockSpeech::new();
        speech
            .expect_synthesize()
            .returning(|_| Err(ApplicationError::RateLimited));

        let mut media_store = MockMediaStore::new();
        media_store.expect_store_chapter().never();
        media_store.expect_merge_chapters().never();

        let result = service(inference, speech, media_store)
            .generate("[]", BookLength::Minutes3)
            .await;

        assert!(matches!(result, Err(ApplicationError::RateLimited)));
    }

    #[tokio::test]
    async fn failed_merge_discards_scratch_chapters() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(2)
            .returning(|_| Ok(text_result("text")));

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().returning(|_| Ok(audio_result()));

        let mut media_store = MockMediaStore::new();
        media_store.expect_store_chapter().returning(|_, _, _| Ok(()));
        media_store
            .expect_merge_chapters()
            .returning(|_, _| Err(ApplicationError::Storage("ffmpeg exited with 1".to_string())));
        media_store
            .expect_discard_chapters()
            .withf(|_, count| *count == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(inference, speech, media_store)
            .generate("[]", BookLength::Minutes3)
            .await;

        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }

    #[tokio::test]
    async fn failed_store_discards_scratch_chapters() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .times(2)
            .returning(|_| Ok(text_result("text")));

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().returning(|_| Ok(audio_result()));

        let mut media_store = MockMediaStore::new();
        media_store
            .expect_store_chapter()
            .returning(|_, _, _| Err(ApplicationError::Storage("disk full".to_string())));
        media_store.expect_merge_chapters().never();
        media_store
            .expect_discard_chapters()
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(inference, speech, media_store)
            .generate("[]", BookLength::Minutes3)
            .await;

        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }

    #[tokio::test]
    async fn topic_prompt_embeds_the_chat_history() {
        let mut inference = MockInference::new();
        inference
            .expect_generate()
            .withf(|messages: &[ChatMessage]| {
                messages[0]
                    .content
                    .contains("chat_history: [{\"role\":\"user\",\"content\":\"whales\"}]")
            })
            .times(1)
            .returning(|_| Ok(text_result("Whales")));
        inference
            .expect_generate()
            .returning(|_| Ok(text_result("chapter")));

        let mut speech = MockSpeech::new();
        speech.expect_synthesize().returning(|_| Ok(audio_result()));

        let mut media_store = MockMediaStore::new();
        media_store.expect_store_chapter().returning(|_, _, _| Ok(()));
        expect_merge(&mut media_store, 1);

        let result = service(inference, speech, media_store)
            .generate(r#"[{"role":"user","content":"whales"}]"#, BookLength::Minutes3)
            .await;

        assert!(result.is_ok());
    }
}
