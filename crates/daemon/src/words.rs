// Default content pool for processed values.
// Overridable via SEQUENT_CONTENT_POOL (comma-separated).

pub const DEFAULT_WORDS: &[&str] = &[
    "casa", "carro", "arvore", "flor", "ceu", "terra", "agua", "fogo", "vento", "sol", "lua",
    "estrela", "nuvem", "chuva", "rio", "mar", "montanha", "cidade", "pessoa", "amor", "paz",
    "alegria", "trabalho", "escola", "computador", "telefone", "livro", "caneta", "papel", "mesa",
    "cadeira", "porta", "janela", "rua", "parque", "jardim", "cozinha", "quarto", "comida",
    "bebida", "fruta", "pao", "leite", "cafe", "cha", "acucar", "sal", "chocolate", "bolo",
    "sopa", "carne", "peixe", "arroz", "feijao", "pizza", "salada", "suco", "vinho", "musica",
    "filme", "jogo", "esporte", "viagem", "ferias", "praia", "floresta", "deserto", "neve",
    "gelo", "calor", "frio", "luz", "sombra", "silencio", "tempo", "hora", "dia", "noite",
    "semana", "mes", "ano", "ontem", "hoje", "amanha", "sempre", "nunca", "grande", "pequeno",
    "alto", "baixo", "forte", "fraco", "rapido", "devagar", "novo", "velho", "bonito", "feliz",
    "verdade", "pergunta", "resposta", "ajuda", "obrigado", "ola", "adeus",
];
