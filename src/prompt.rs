use crate::model::Turn;

const NO_CONTEXT: &str = "Nessun dato disponibile.";

pub const ACKNOWLEDGMENT: &str =
    "Ricevuto. Ho analizzato i dati e sono pronto a comportarmi come orientatore.";

pub fn system_instructions(context: Option<&str>) -> String {
    let student = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_CONTEXT);

    format!(
        "ISTRUZIONI DI SISTEMA:
Agisci come un orientatore universitario esperto, empatico e visionario.
Stai parlando con uno studente che ha appena fatto un test di orientamento.

DATI STUDENTE:
{student}

REGOLE:
1. Rispondi in modo breve (max 4 frasi) e motivante.
2. Usa qualche emoji ma mai più di 3 per messaggio.
3. Basati SUI DATI FORNITI per dare consigli personalizzati.
4. Non inventare facoltà che non esistono.
5. NON mostrare MAI all'utente nomi di variabili interne, codici tecnici o chiavi dei dati (es. \"q_broken\", \"q_manual\", \"score_mat\"). Traduci sempre questi concetti in linguaggio naturale (es. \"la tua curiosità nello smontare le cose\" invece di \"q_broken\").
6. NON usare formattazione Markdown (niente grassetto, corsivo, elenchi puntati o titoli). Scrivi sempre in testo semplice e discorsivo."
    )
}

pub fn conversation(
    context: Option<&str>,
    history: impl IntoIterator<Item = Turn>,
) -> Vec<Turn> {
    let mut turns = vec![
        Turn::user(system_instructions(context)),
        Turn::model(ACKNOWLEDGMENT),
    ];
    turns.extend(history);
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn embeds_student_context() {
        let block = system_instructions(Some("interessato a ingegneria"));
        assert!(block.contains("DATI STUDENTE:\ninteressato a ingegneria"));
        assert!(!block.contains(NO_CONTEXT));
    }

    #[test]
    fn placeholder_when_context_missing_or_blank() {
        assert!(system_instructions(None).contains(NO_CONTEXT));
        assert!(system_instructions(Some("  ")).contains(NO_CONTEXT));
    }

    #[test]
    fn rules_are_present() {
        let block = system_instructions(None);
        assert!(block.contains("max 4 frasi"));
        assert!(block.contains("q_broken"));
        assert!(block.contains("Markdown"));
    }

    #[test]
    fn conversation_starts_with_instructions_then_acknowledgment() {
        let history = vec![Turn::user("Ciao"), Turn::model("Ciao a te!")];
        let turns = conversation(Some("ama la biologia"), history.clone());

        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::User);
        assert!(turns[0].text().contains("ama la biologia"));
        assert_eq!(turns[1], Turn::model(ACKNOWLEDGMENT));
        assert_eq!(&turns[2..], history.as_slice());
    }
}
